use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::resumes::repo_types::Resume;

/// Full set of resume fields; used for create and for full-replace updates.
#[derive(Debug, Deserialize)]
pub struct ResumePayload {
    pub name: String,
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub references: String,
    pub contact: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
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
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl From<Resume> for ResumeResponse {
    fn from(r: Resume) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            summary: r.summary,
            skills: r.skills,
            experience: r.experience,
            education: r.education,
            projects: r.projects,
            achievements: r.achievements,
            strengths: r.strengths,
            references: r.references,
            contact: r.contact,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    10
}

impl Pagination {
    /// Clamp to sane bounds: non-negative offset, 1..=100 page size.
    pub fn clamped(&self) -> (i64, i64) {
        (self.offset.max(0), self.limit.clamp(1, MAX_PAGE_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.offset, 0);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn pagination_caps_the_limit() {
        let p = Pagination {
            offset: -5,
            limit: 5000,
        };
        assert_eq!(p.clamped(), (0, MAX_PAGE_SIZE));
    }

    #[test]
    fn pagination_keeps_requested_page() {
        let p = Pagination {
            offset: 10,
            limit: 10,
        };
        assert_eq!(p.clamped(), (10, 10));
    }
}
