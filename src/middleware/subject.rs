//! Subject identity extraction
//!
//! Analysis history is scoped per subject. The client names its subject with
//! the `X-Device-Id` header; requests without one share the anonymous scope.
//! This is identity, not authentication.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Header carrying the client device identity
pub const DEVICE_ID_HEADER: &str = "x-device-id";

const ANONYMOUS_SUBJECT: &str = "anonymous";

/// Subject identity extracted from request headers
#[derive(Debug, Clone)]
pub struct SubjectContext {
    pub device_id: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for SubjectContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let device_id = parts
            .headers
            .get(DEVICE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(ANONYMOUS_SUBJECT)
            .to_string();

        Ok(SubjectContext { device_id })
    }
}
