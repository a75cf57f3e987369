//! Request-scoped values resolved before a handler runs.

pub mod meter;

pub use meter::{resolve, MeterKey, ResolvedMeter};
