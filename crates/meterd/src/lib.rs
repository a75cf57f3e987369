//! Top-level facade crate for meterd.
//!
//! Re-exports the domain types and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use meterd_core::*;
}

pub mod gateway {
    pub use meterd_gateway::*;
}
