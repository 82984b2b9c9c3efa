use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderName},
};

/// Request id stored in request extensions by the ingress middleware.
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Extractor yielding the current request id, if any.
///
/// Prefers the value the ingress put into extensions and falls back to the raw header,
/// so handlers mounted without the ingress stack (tests) still work.
#[derive(Clone, Debug, Default)]
pub struct RequestId(pub Option<String>);

impl RequestId {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(XRequestId(id)) = parts.extensions.get::<XRequestId>() {
            return Ok(Self(Some(id.clone())));
        }
        let from_header = parts
            .headers
            .get(header())
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(Self(from_header))
    }
}
