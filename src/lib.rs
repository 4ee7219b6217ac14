//! # Wigglebin Models
//!
//! Hour-by-hour temperature models of outdoor worm and compost bins, for
//! comparing bin designs (color, insulation, shading, venting, fans, ice
//! packs, solar heating, phase-change buffering) against worm-friendly
//! thermal zones.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`scenario`]: Runs many named bin designs over the same weather.
//! - [`support`]: Weather input, numeric constraints, and zone reporting.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod scenario;
pub mod support;
