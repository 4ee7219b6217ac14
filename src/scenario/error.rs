use std::path::PathBuf;

use thiserror::Error;

use crate::models::thermal::enclosure::SimulateError;

/// Errors that can occur while loading or running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A scenario file could not be read.
    #[error("failed to read scenario file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scenario file is not valid TOML or has invalid fields.
    #[error("invalid scenario file")]
    Parse(#[from] toml::de::Error),

    /// Two scenarios share a name.
    #[error("duplicate scenario name `{0}`")]
    DuplicateName(String),

    /// A scenario's simulation could not start.
    #[error("scenario `{name}` failed")]
    Simulate {
        name: String,
        #[source]
        source: SimulateError,
    },

    /// Writing a result table failed.
    #[error("failed to write scenario table")]
    Csv(#[from] csv::Error),
}
