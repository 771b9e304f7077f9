//! Bearer token identity.
//!
//! Tokens are issued by the external auth provider and signed with the
//! shared HS256 secret. A request without a token is anonymous; a request
//! with an invalid token is rejected.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
    Extension,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{CurrentUser, UserRole};

use super::AppState;

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        CurrentUser {
            id: claims.sub,
            email: claims.email,
            role: UserRole::from(claims.role),
        }
    }
}

/// Verifies bearer tokens against the shared secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn verify(&self, token: &str) -> AppResult<CurrentUser> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(CurrentUser::from(token_data.claims))
    }
}

/// Attach the caller's identity to the request when a bearer token is present.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = extract_token(&request)? {
        let user = state.tokens.verify(&token)?;
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<Option<String>> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| AppError::Unauthorized)?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        _ => Err(AppError::Unauthorized),
    }
}

/// Identity set by [`identity_middleware`], if any.
pub fn identity(user: Option<Extension<CurrentUser>>) -> Option<CurrentUser> {
    user.map(|Extension(user)| user)
}

/// Require a signed-in administrator.
pub fn require_admin(user: Option<&CurrentUser>) -> AppResult<&CurrentUser> {
    match user {
        Some(user) if user.is_admin() => Ok(user),
        Some(_) => Err(AppError::Forbidden),
        None => Err(AppError::Unauthorized),
    }
}
