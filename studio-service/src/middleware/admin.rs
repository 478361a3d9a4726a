//! Admin gate for mutating and private routes.
//!
//! The extractor never rejects. It resolves to an `authorized` flag that the
//! services enforce, so public and admin reads can share one handler shape.

use crate::startup::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;
use std::convert::Infallible;
use subtle::ConstantTimeEq;

pub const ADMIN_API_KEY_HEADER: &str = "X-Admin-Api-Key";

/// Whether the request carried the configured admin API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAccess {
    pub authorized: bool,
}

impl AdminAccess {
    /// Gate an extracted admin request body so unauthenticated callers see
    /// 401 before any body rejection.
    pub fn admit<T>(&self, body: Result<T, AppError>) -> Result<T, AppError> {
        if !self.authorized {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Invalid or missing admin API key"
            )));
        }
        body
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(ADMIN_API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        let authorized = key_matches(state.config.admin_api_key.as_ref(), presented);
        if presented.is_some() && !authorized {
            tracing::warn!("Failed admin authentication attempt");
        }

        Ok(AdminAccess { authorized })
    }
}

fn key_matches(expected: Option<&Secret<String>>, presented: Option<&str>) -> bool {
    match (expected, presented) {
        (Some(expected), Some(presented)) => expected
            .expose_secret()
            .as_bytes()
            .ct_eq(presented.as_bytes())
            .into(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_configured_key() {
        let key = Secret::new("admin-key".to_string());

        assert!(key_matches(Some(&key), Some("admin-key")));
        assert!(!key_matches(Some(&key), Some("admin-ke")));
        assert!(!key_matches(Some(&key), Some("")));
        assert!(!key_matches(Some(&key), None));
    }

    #[test]
    fn unset_key_authorizes_nobody() {
        assert!(!key_matches(None, Some("")));
        assert!(!key_matches(None, Some("anything")));
    }
}
