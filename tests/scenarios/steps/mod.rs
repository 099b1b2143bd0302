//! Step definitions.

pub mod dashboard;
