//! Bearer token authentication.
//!
//! [`authenticate`] runs in front of the note routes: when the request
//! carries `Authorization: Bearer <jwt>` it verifies the token and stores the
//! `sub` claim in the request extensions as an [`AuthUser`]. Handlers take
//! [`AuthUser`] as an extractor, which rejects requests that reached them
//! without an identity.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use std::sync::Arc;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub exp: usize,
}

/// Authenticated user resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

/// Verification material for HS256 tokens.
#[derive(Clone)]
pub struct AuthKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl AuthKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, ApiError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!("token validation failed: {e}");
                ApiError::Unauthorized("Invalid token".to_string())
            })?;

        if data.claims.sub.trim().is_empty() {
            return Err(ApiError::Unauthorized("Invalid token".to_string()));
        }

        Ok(AuthUser {
            id: data.claims.sub,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
}

pub async fn authenticate(
    State(keys): State<Arc<AuthKeys>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    if let Some(token) = bearer_token(&parts) {
        let user = keys.verify(token)?;
        tracing::debug!("authenticated user {}", user.id);
        parts.extensions.insert(user);
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(sub: &str, secret: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: 4_102_444_800,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verify_accepts_valid_token() {
        let user = AuthKeys::new(SECRET).verify(&token("user-1", SECRET)).unwrap();

        assert_eq!(user.id, "user-1");
    }

    #[test]
    fn verify_rejects_foreign_signature() {
        let err = AuthKeys::new(SECRET)
            .verify(&token("user-1", "other-secret"))
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn verify_rejects_blank_subject() {
        let err = AuthKeys::new(SECRET).verify(&token("  ", SECRET)).unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let (parts, ()) = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Basic abc")
            .body(())
            .unwrap()
            .into_parts();

        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        for value in ["bearer abc.def", "BEARER abc.def", "Bearer   abc.def"] {
            let (parts, ()) = axum::http::Request::builder()
                .header(header::AUTHORIZATION, value)
                .body(())
                .unwrap()
                .into_parts();

            assert_eq!(bearer_token(&parts), Some("abc.def"), "{value}");
        }
    }

    #[tokio::test]
    async fn extractor_rejects_missing_identity() {
        let (mut parts, ()) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert_eq!(err.to_string(), "User not authenticated");
    }

    #[tokio::test]
    async fn extractor_reads_identity_from_extensions() {
        let (mut parts, ()) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(AuthUser {
            id: "user-7".to_string(),
        });

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(user.id, "user-7");
    }
}
