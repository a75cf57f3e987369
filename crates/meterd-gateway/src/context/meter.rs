use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use meterd_core::error::{MeterError, Result};
use meterd_core::Meter;

use crate::app_state::AppState;
use crate::store::MeterStore;
use crate::transport::error::ApiError;

/// Path parameter carrying a meter id.
pub const METER_ID_PARAM: &str = "meter_id";
/// Path parameter carrying a meter slug.
pub const METER_SLUG_PARAM: &str = "meter_slug";

/// How a request names its meter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeterKey {
    Id(String),
    Slug(String),
}

impl MeterKey {
    /// Pick the lookup key from matched path parameters.
    /// A non-empty id wins; the slug is only consulted when no id is present.
    pub fn from_params(params: &HashMap<String, String>) -> Option<Self> {
        let non_empty = |k: &str| params.get(k).filter(|v| !v.is_empty()).cloned();
        non_empty(METER_ID_PARAM)
            .map(Self::Id)
            .or_else(|| non_empty(METER_SLUG_PARAM).map(Self::Slug))
    }
}

/// Look up the meter named by `key`.
pub async fn resolve(store: &dyn MeterStore, key: &MeterKey) -> Result<Meter> {
    match key {
        MeterKey::Id(id) => store.get(id).await,
        MeterKey::Slug(slug) => store.get_by_slug(slug).await,
    }
}

/// The meter named by the request path, handed to handlers as an argument.
///
/// Rejects with 404 when the path names no meter or the lookup misses, so the
/// handler never runs without one.
#[derive(Debug, Clone)]
pub struct ResolvedMeter(pub Meter);

#[async_trait]
impl FromRequestParts<AppState> for ResolvedMeter {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let params = match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(params)) => params,
            Err(_) => HashMap::new(),
        };

        // Reached only when the extractor is mounted on a route without a meter segment.
        let Some(key) = MeterKey::from_params(&params) else {
            tracing::debug!(path = %parts.uri.path(), "no meter key in path");
            return Err(MeterError::NotFound.into());
        };

        match resolve(state.store(), &key).await {
            Ok(meter) => Ok(Self(meter)),
            Err(e) => {
                tracing::debug!(?key, "meter lookup missed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use meterd_core::model::fixtures;
    use tower::ServiceExt;

    use super::*;
    use crate::config::MeterdConfig;
    use crate::store::InMemoryMeterStore;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn id_takes_precedence_over_slug() {
        let p = params(&[("meter_id", "1"), ("meter_slug", "sup")]);
        assert_eq!(MeterKey::from_params(&p), Some(MeterKey::Id("1".into())));
    }

    #[test]
    fn slug_used_when_no_id() {
        let p = params(&[("meter_slug", "sup")]);
        assert_eq!(MeterKey::from_params(&p), Some(MeterKey::Slug("sup".into())));
        let p = params(&[("meter_id", ""), ("meter_slug", "sup")]);
        assert_eq!(MeterKey::from_params(&p), Some(MeterKey::Slug("sup".into())));
    }

    #[test]
    fn nothing_to_resolve() {
        assert_eq!(MeterKey::from_params(&params(&[])), None);
        assert_eq!(MeterKey::from_params(&params(&[("other", "x")])), None);
    }

    #[tokio::test]
    async fn resolve_by_id_and_slug() {
        let store = InMemoryMeterStore::with_meters(fixtures()).unwrap();
        let m = resolve(&store, &MeterKey::Id("2".into())).await.unwrap();
        assert_eq!(m.project_name, "sup");
        let m = resolve(&store, &MeterKey::Slug("whats-up".into())).await.unwrap();
        assert_eq!(m.id, "5");
        assert!(matches!(
            resolve(&store, &MeterKey::Id("404".into())).await,
            Err(MeterError::NotFound)
        ));
    }

    #[tokio::test]
    async fn extractor_rejects_route_without_meter_segment() {
        let state = AppState::new(MeterdConfig::default()).unwrap();
        let app = Router::new()
            .route("/unkeyed", get(|ResolvedMeter(m): ResolvedMeter| async move { m.id }))
            .route("/keyed/:meter_id", get(|ResolvedMeter(m): ResolvedMeter| async move { m.id }))
            .with_state(state);

        let res = app
            .clone()
            .oneshot(Request::get("/unkeyed").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .oneshot(Request::get("/keyed/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
