//! Request and response payloads for [`Meter`].
//!
//! Requests never carry a usable `id` or `slug`: the id is owned by the store
//! and the slug is derived. Binding happens after decode and is the only place
//! the duration string is validated.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::duration::parse_duration;
use crate::error::{MeterError, Result};
use crate::model::{Meter, DEFAULT_DURATION};

/// Decoded body of a create/update request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MeterRequest {
    /// Client-supplied id. Accepted on the wire and always discarded.
    #[allow(dead_code)]
    #[serde(rename = "id")]
    protected_id: Option<IgnoredAny>,
    /// Embedded author object. Accepted and ignored.
    #[allow(dead_code)]
    user: Option<IgnoredAny>,
    /// Client-supplied slug. Always recomputed.
    #[allow(dead_code)]
    slug: Option<IgnoredAny>,

    pub user_id: i64,
    #[serde(rename = "project")]
    pub project_name: String,
    pub ora_conn: String,
    pub ora_user: String,
    pub ora_password: String,
    pub duration: String,
}

impl MeterRequest {
    /// Turn the request into a new, id-less [`Meter`].
    pub fn bind(self) -> Result<Meter> {
        let duration = if self.duration.is_empty() {
            DEFAULT_DURATION.to_string()
        } else {
            self.duration
        };
        let parsed_duration = parse_duration(&duration).map_err(|e| {
            MeterError::InvalidRequest(format!("parse {duration:?} to duration failed: {e}"))
        })?;

        Ok(Meter {
            id: String::new(),
            user_id: self.user_id,
            slug: self.project_name.to_lowercase(),
            project_name: self.project_name,
            ora_conn: self.ora_conn,
            ora_user: self.ora_user,
            ora_password: self.ora_password,
            duration,
            parsed_duration,
        })
    }

    /// Bind as a full replacement of `existing`, keeping its id.
    pub fn bind_onto(self, existing: &Meter) -> Result<Meter> {
        let mut meter = self.bind()?;
        meter.id = existing.id.clone();
        Ok(meter)
    }
}

/// Wire form of a [`Meter`] sent back to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MeterResponse(Meter);

impl MeterResponse {
    pub fn new(meter: Meter) -> Self {
        Self(meter)
    }

    pub fn list(meters: Vec<Meter>) -> Vec<Self> {
        meters.into_iter().map(Self::new).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::duration::MeterDuration;

    fn req(json: &str) -> MeterRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bind_derives_slug_and_default_duration() {
        let m = req(r#"{"project":"Awesomeness"}"#).bind().unwrap();
        assert_eq!(m.slug, "awesomeness");
        assert_eq!(m.duration, "1h");
        assert_eq!(m.parsed_duration, MeterDuration::from_secs(3600));
        assert!(m.id.is_empty());
    }

    #[test]
    fn bind_discards_client_id_and_slug() {
        let m = req(r#"{"id":"will-be-omitted","slug":"nope","project":"X","user":{"id":1}}"#)
            .bind()
            .unwrap();
        assert!(m.id.is_empty());
        assert_eq!(m.slug, "x");
    }

    #[test]
    fn bind_accepts_non_string_client_id() {
        let m = req(r#"{"id":97,"project":"X"}"#).bind().unwrap();
        assert!(m.id.is_empty());
    }

    #[test]
    fn bind_parses_explicit_duration() {
        let m = req(r#"{"project":"X","duration":"1m"}"#).bind().unwrap();
        assert_eq!(m.duration, "1m");
        assert_eq!(m.parsed_duration, MeterDuration::from_secs(60));
    }

    #[test]
    fn bind_accepts_negative_duration() {
        let m = req(r#"{"project":"X","duration":"-5m"}"#).bind().unwrap();
        assert_eq!(m.duration, "-5m");
        assert_eq!(m.parsed_duration, MeterDuration::from_secs(-300));
    }

    #[test]
    fn bind_does_not_default_whitespace_duration() {
        let err = req(r#"{"project":"X","duration":"  "}"#).bind().unwrap_err();
        assert_eq!(err.client_code().as_str(), "INVALID_REQUEST");
    }

    #[test]
    fn bind_rejects_bad_duration() {
        let err = req(r#"{"project":"X","duration":"D1393"}"#).bind().unwrap_err();
        assert_eq!(err.client_code().as_str(), "INVALID_REQUEST");
        assert!(err.to_string().contains("D1393"));
    }

    #[test]
    fn bind_onto_keeps_id_and_replaces_the_rest() {
        let existing = Meter {
            id: "7".into(),
            user_id: 1,
            project_name: "Old".into(),
            ora_user: "scott".into(),
            ..Meter::default()
        };
        let m = req(r#"{"id":"99","project":"New","user_id":2}"#)
            .bind_onto(&existing)
            .unwrap();
        assert_eq!(m.id, "7");
        assert_eq!(m.user_id, 2);
        assert_eq!(m.slug, "new");
        assert_eq!(m.ora_user, "");
    }

    #[test]
    fn response_serializes_as_plain_meter() {
        let m = req(r#"{"project":"X"}"#).bind().unwrap();
        let a = serde_json::to_value(MeterResponse::new(m.clone())).unwrap();
        let b = serde_json::to_value(&m).unwrap();
        assert_eq!(a, b);
    }
}
