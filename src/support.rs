//! Supporting utilities used by models.
//!
//! These modules are public because they're useful on their own (building
//! weather inputs, summarizing traces), but their APIs are not stable.

pub mod constraint;
pub mod weather;
pub mod zones;
