//! Machine health scoring and aggregation.
//!
//! This module assembles per-machine sensor readings, computes a scalar
//! health score per machine from a fixed weighted formula, and derives
//! alert lists from the score threshold and missing-sensor conditions.

pub mod factory;
pub mod machine;
pub mod sensor;
