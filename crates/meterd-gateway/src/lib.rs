//! meterd gateway library entry.
//!
//! This crate wires config, the meter store, the resolver, and the REST
//! handlers into an axum application. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transport;
