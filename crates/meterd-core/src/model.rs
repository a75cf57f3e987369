//! Meter data model.

use serde::{Deserialize, Serialize};

use crate::duration::MeterDuration;

/// Duration applied when a request leaves `duration` empty.
pub const DEFAULT_DURATION: &str = "1h";

/// A metering profile for one project.
///
/// `id` is server-assigned and unique within a store. `slug` is derived from
/// `project_name` whenever a request is bound and may collide across records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meter {
    pub id: String,
    /// Author reference. Not validated against any user store.
    pub user_id: i64,
    #[serde(rename = "project")]
    pub project_name: String,
    pub ora_conn: String,
    pub ora_user: String,
    pub ora_password: String,
    /// Human form, e.g. `"1h"`.
    pub duration: String,
    /// Machine form of `duration`, filled at bind time.
    #[serde(skip)]
    pub parsed_duration: MeterDuration,
    pub slug: String,
}

impl Meter {
    fn fixture(id: &str, user_id: i64, project: &str, slug: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id,
            project_name: project.to_string(),
            duration: DEFAULT_DURATION.to_string(),
            parsed_duration: MeterDuration::from_secs(60 * 60),
            slug: slug.to_string(),
            ..Self::default()
        }
    }
}

/// Demo records a fresh store can be seeded with.
pub fn fixtures() -> Vec<Meter> {
    vec![
        Meter::fixture("1", 100, "Hi", "hi"),
        Meter::fixture("2", 200, "sup", "sup"),
        Meter::fixture("3", 300, "alo", "alo"),
        Meter::fixture("4", 400, "bonjour", "bonjour"),
        Meter::fixture("5", 500, "whats up", "whats-up"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_uses_wire_names() {
        let m = fixtures().remove(0);
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["id"], "1");
        assert_eq!(v["user_id"], 100);
        assert_eq!(v["project"], "Hi");
        assert_eq!(v["duration"], "1h");
        assert_eq!(v["slug"], "hi");
        assert!(v.get("parsed_duration").is_none());
        assert!(v.get("project_name").is_none());
    }

    #[test]
    fn fixture_ids_are_unique() {
        let f = fixtures();
        let mut ids: Vec<_> = f.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), f.len());
    }
}
