//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use meterd_core::error::{MeterError, Result};

pub use schema::{HttpSection, MeterdConfig, StoreSection};

pub fn load_from_file(path: &str) -> Result<MeterdConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MeterError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MeterdConfig> {
    let cfg: MeterdConfig = serde_yaml::from_str(s)
        .map_err(|e| MeterError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_default(path: &str) -> Result<MeterdConfig> {
    if Path::new(path).exists() {
        return load_from_file(path);
    }
    tracing::info!(%path, "config file not found, using defaults");
    let cfg = MeterdConfig::default();
    cfg.validate()?;
    Ok(cfg)
}
