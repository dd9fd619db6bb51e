//! # Authentication Module
//!
//! Bearer-token authentication for the portal API.
//!
//! Access tokens are HS256 JSON Web Tokens carrying the patient's email. They
//! are issued by `GET /jwt` for known users and checked by the [`AuthUser`]
//! and [`AdminUser`] extractors:
//!
//! - a missing or malformed `Authorization` header is rejected with 401
//! - a token with a bad signature or past its expiry is rejected with 403
//! - [`AdminUser`] additionally requires the stored role to be `admin`

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use portal_core::{
    auth::{Rule, Subject},
    errors::{PortalError, PortalResult},
    store::UserStore,
};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::warn;

use crate::{middleware::error_handling::AppError, ApiState};

type HmacSha256 = Hmac<Sha256>;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    typ: String,
}

fn unauthorized() -> PortalError {
    PortalError::Authentication("unauthorized access".to_string())
}

fn forbidden() -> PortalError {
    PortalError::Authorization("forbidden access".to_string())
}

/// Signs and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    pub fn issue(&self, email: &str) -> PortalResult<String> {
        self.issue_at(email, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> PortalResult<String> {
        let header = JwtHeader {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let header_json = serde_json::to_vec(&header).map_err(|e| PortalError::Internal(Box::new(e)))?;
        let claims_json = serde_json::to_vec(&claims).map_err(|e| PortalError::Internal(Box::new(e)))?;

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = self.mac()?;
        mac.update(message.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{message}.{signature}"))
    }

    pub fn verify(&self, token: &str) -> PortalResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> PortalResult<Claims> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(forbidden());
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| forbidden())?;
        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature).map_err(|_| forbidden())?;

        let header: JwtHeader = URL_SAFE_NO_PAD
            .decode(header_b64)
            .ok()
            .and_then(|raw| serde_json::from_slice(&raw).ok())
            .ok_or_else(forbidden)?;
        if header.alg != "HS256" {
            return Err(forbidden());
        }

        let claims: Claims = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .ok()
            .and_then(|raw| serde_json::from_slice(&raw).ok())
            .ok_or_else(forbidden)?;

        if claims.exp <= now.timestamp() {
            return Err(forbidden());
        }

        Ok(claims)
    }

    fn mac(&self) -> PortalResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| PortalError::Internal(format!("Invalid token secret: {e}").into()))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> PortalResult<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(unauthorized)
}

/// An authenticated caller, with the role currently stored for their email.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Subject);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).inspect_err(|_| {
            warn!(path = %parts.uri.path(), "Request without bearer token");
        })?;

        let claims = state.tokens.verify(token).inspect_err(|_| {
            warn!(path = %parts.uri.path(), "Rejected access token");
        })?;

        let role = state
            .store
            .find_user_by_email(&claims.email)
            .await?
            .map(|user| user.role)
            .unwrap_or_default();

        Ok(AuthUser(Subject::new(claims.email, role)))
    }
}

/// An authenticated caller whose stored role is `admin`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Subject);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(subject) = AuthUser::from_request_parts(parts, state).await?;

        Rule::admin().check(&subject).inspect_err(|_| {
            warn!(email = %subject.email, "Non-admin attempted an admin action");
        })?;

        Ok(AdminUser(subject))
    }
}
