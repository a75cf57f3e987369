//! HTTP transport: handlers, payload codec, and the error envelope.

pub mod codec;
pub mod error;
pub mod http;
