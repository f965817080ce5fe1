//! HTTP Basic authentication guard.
//!
//! Access control is deliberately coarse: authenticated or not, nothing
//! finer. Handlers opt in by taking the [`RequireAuth`] extractor; with
//! no credentials configured every request passes.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::DashboardState;

/// The single credential pair accepted by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Extractor rejecting requests that don't carry the configured
/// credentials.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth;

impl FromRequestParts<DashboardState> for RequireAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &DashboardState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = &state.auth else {
            return Ok(RequireAuth);
        };

        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if let Some(value) = authorization
            && credentials_match(value, expected)
        {
            return Ok(RequireAuth);
        }

        tracing::warn!("rejected unauthenticated dashboard request");
        Err(unauthorized())
    }
}

fn credentials_match(header_value: &str, expected: &BasicCredentials) -> bool {
    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    match decoded.split_once(':') {
        Some((username, password)) => {
            username == expected.username && password == expected.password
        }
        None => false,
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"backstat\"")],
        "authentication required",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> BasicCredentials {
        BasicCredentials {
            username: "ops".to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
    }

    #[test]
    fn accepts_matching_credentials() {
        assert!(credentials_match(&basic("ops", "s3cret"), &expected()));
    }

    #[test]
    fn rejects_wrong_password() {
        assert!(!credentials_match(&basic("ops", "nope"), &expected()));
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert!(!credentials_match("Bearer token", &expected()));
    }

    #[test]
    fn rejects_garbage_encoding() {
        assert!(!credentials_match("Basic %%%", &expected()));
    }

    #[test]
    fn rejects_missing_separator() {
        let value = format!("Basic {}", STANDARD.encode("no-colon-here"));
        assert!(!credentials_match(&value, &expected()));
    }
}
