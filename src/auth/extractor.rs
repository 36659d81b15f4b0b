use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{JwtKeys, TokenError};
use crate::errors::AppError;
use crate::state::AppState;
use crate::users::repo_types::User;

/// Resolves the bearer token of a request into the authenticated user.
/// Rejects with `Unauthenticated` on a missing/invalid/expired token and
/// with `AccountNotFound` when the subject no longer maps to a user row.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(AppError::Unauthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => warn!("expired token"),
                TokenError::Invalid => warn!("invalid token"),
            }
            AppError::Unauthenticated
        })?;

        let user = User::find_by_email(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(subject = %claims.sub, "token subject no longer exists");
                AppError::AccountNotFound
            })?;

        Ok(CurrentUser(user))
    }
}
