use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Root directory for uploaded files (profile pictures).
    pub media_dir: String,
    /// OAuth client ID the Google ID token's `aud` claim must match.
    pub google_client_id: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let media_dir = std::env::var("MEDIA_DIR").unwrap_or_else(|_| "media".into());
        let google_client_id = std::env::var("GOOGLE_CLIENT_ID")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "resumind".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "resumind-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        Ok(Self {
            database_url,
            media_dir,
            google_client_id,
            jwt,
        })
    }
}
