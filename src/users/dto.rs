use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Profile as returned to clients; never includes the password hash.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            bio: user.bio,
            phone: user.phone,
            profile_picture: user.profile_picture,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct PictureResponse {
    pub profile_picture: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn profile_response_omits_the_hash() {
        let user = User {
            id: 7,
            email: "a@x.com".into(),
            password_hash: "secret-digest".into(),
            full_name: Some("Ada".into()),
            bio: None,
            phone: None,
            profile_picture: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&ProfileResponse::from(user)).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("secret-digest"));
    }
}
