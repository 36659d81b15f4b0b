use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Resume record in the database. All section fields are free text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
    pub achievements: String,
    pub strengths: String,
    pub references: String,
    pub contact: String,
    /// Legacy fields kept for older clients.
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
}
