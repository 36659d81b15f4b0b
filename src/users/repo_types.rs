use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 hash, not exposed in JSON. Empty for accounts created through
    /// external login only.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    /// Path of the uploaded picture; the bytes live on disk.
    pub profile_picture: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Allow-listed profile fields a user may change. Anything absent from the
/// payload is left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_profile_fields_default_to_absent() {
        let update: UpdateProfile = serde_json::from_str(r#"{"bio": "hello"}"#).unwrap();
        assert_eq!(update.bio.as_deref(), Some("hello"));
        assert!(update.full_name.is_none());
        assert!(update.phone.is_none());
        assert!(update.profile_picture.is_none());
    }

    #[test]
    fn unknown_fields_are_not_writable() {
        // serde ignores unknown keys; only the allow-listed four exist
        let update: UpdateProfile =
            serde_json::from_str(r#"{"password_hash": "x", "bio": "ok"}"#).unwrap();
        assert_eq!(update.bio.as_deref(), Some("ok"));
    }
}
