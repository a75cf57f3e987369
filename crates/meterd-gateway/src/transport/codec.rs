//! JSON decode/encode for meter payloads.
//!
//! Decode failures of any kind (bad JSON, wrong content type, oversized body)
//! become `InvalidRequest` so clients always get the error envelope.
//! Encode failures become `Render` (422) instead of a bare 500.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use meterd_core::error::MeterError;
use meterd_core::MeterRequest;

use super::error::ApiError;

/// Request body decoded into a [`MeterRequest`], not yet bound.
#[derive(Debug)]
pub struct MeterBody(pub MeterRequest);

#[async_trait]
impl<S> FromRequest<S> for MeterBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<MeterRequest>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "meter body rejected");
                Err(MeterError::InvalidRequest(rejection.body_text()).into())
            }
        }
    }
}

/// Serialize `value` as a JSON response with `status`.
pub fn render<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(value).map_err(|e| {
        tracing::warn!(error = %e, "response render failed");
        MeterError::Render(e.to_string())
    })?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serializer;

    use super::*;

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("boom"))
        }
    }

    #[test]
    fn render_sets_status_and_content_type() {
        let mut v = BTreeMap::new();
        v.insert("a", 1);
        let res = render(StatusCode::CREATED, &v).unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn render_failure_maps_to_422() {
        let Err(err) = render(StatusCode::OK, &Unrenderable) else {
            panic!("render must fail");
        };
        assert!(matches!(err.0, MeterError::Render(_)));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
