//! meterd core: transport-agnostic meter model, payload binding, and errors.
//!
//! This crate owns the data contracts shared by the HTTP gateway and any other
//! front end. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input surfaces as `MeterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod duration;
pub mod error;
pub mod model;
pub mod payload;

/// Shared result type.
pub use error::{MeterError, Result};
pub use duration::MeterDuration;
pub use model::Meter;
pub use payload::{MeterRequest, MeterResponse};
