use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Claims of interest from a verified Google ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    pub aud: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// External identity verification, behind a trait so tests and offline
/// environments can substitute a stub.
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleClaims, AppError>;
}

/// Verifies Google ID tokens against the tokeninfo endpoint, which performs
/// the signature check against Google's published keys on our behalf.
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self { http, client_id })
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleClaims, AppError> {
        let resp = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "tokeninfo request failed");
                AppError::InvalidExternalToken
            })?;

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "tokeninfo rejected the token");
            return Err(AppError::InvalidExternalToken);
        }

        let claims: GoogleClaims = resp.json().await.map_err(|e| {
            warn!(error = %e, "tokeninfo response was not decodable");
            AppError::InvalidExternalToken
        })?;

        if claims.aud != self.client_id {
            warn!(aud = %claims.aud, "tokeninfo audience mismatch");
            return Err(AppError::InvalidExternalToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_deserialize_from_tokeninfo_shape() {
        let body = r#"{
            "iss": "https://accounts.google.com",
            "aud": "client-123.apps.googleusercontent.com",
            "sub": "110169484474386276334",
            "email": "user@gmail.com",
            "email_verified": "true",
            "name": "Jane Doe",
            "exp": "1717000000"
        }"#;
        let claims: GoogleClaims = serde_json::from_str(body).expect("deserialize");
        assert_eq!(claims.aud, "client-123.apps.googleusercontent.com");
        assert_eq!(claims.email.as_deref(), Some("user@gmail.com"));
        assert_eq!(claims.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn email_claim_is_optional() {
        let body = r#"{"aud": "client-123", "sub": "1"}"#;
        let claims: GoogleClaims = serde_json::from_str(body).expect("deserialize");
        assert!(claims.email.is_none());
    }
}
