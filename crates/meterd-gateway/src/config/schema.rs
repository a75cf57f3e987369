use std::net::SocketAddr;

use serde::Deserialize;
use meterd_core::error::{MeterError, Result};

const MAX_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeterdConfig {
    pub version: u32,

    #[serde(default)]
    pub http: HttpSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for MeterdConfig {
    fn default() -> Self {
        Self {
            version: 1,
            http: HttpSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl MeterdConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MeterError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.http.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Versioned parent scope for the meter routes, e.g. `/v1`. Empty mounts at root.
    #[serde(default)]
    pub base_path: String,

    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            base_path: String::new(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl HttpSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        if !self.base_path.is_empty() {
            if !self.base_path.starts_with('/') || self.base_path.ends_with('/') {
                return Err(MeterError::BadRequest(
                    "http.base_path must start with '/' and must not end with '/'".into(),
                ));
            }
            if self.base_path.contains([':', '*', '{', '}']) {
                return Err(MeterError::BadRequest(
                    "http.base_path must not contain route parameters".into(),
                ));
            }
        }

        if !(1..=MAX_BODY_LIMIT_BYTES).contains(&self.body_limit_bytes) {
            return Err(MeterError::BadRequest(format!(
                "http.body_limit_bytes must be between 1 and {MAX_BODY_LIMIT_BYTES}"
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MeterError::BadRequest(format!("http.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:3333".into()
}
fn default_body_limit_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Start with the demo meters instead of an empty store.
    #[serde(default = "default_seed_fixtures")]
    pub seed_fixtures: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            seed_fixtures: default_seed_fixtures(),
        }
    }
}

fn default_seed_fixtures() -> bool {
    true
}
