//! Thermal systems models.
//!
//! This module contains lumped-capacitance models of small outdoor
//! enclosures driven by hourly weather.

pub mod enclosure;
