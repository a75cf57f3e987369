//! JSON test vector loader for request binding tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BindVector {
    pub description: String,
    /// Raw request body as a client would send it.
    pub request: serde_json::Value,
    #[serde(default)]
    pub expect: Option<ExpectMeter>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectMeter {
    pub project: String,
    pub slug: String,
    pub duration: String,
    pub duration_millis: i64,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
}

pub fn load(name: &str) -> BindVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
