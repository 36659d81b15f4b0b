use sqlx::PgPool;

use crate::resumes::dto::ResumePayload;
use crate::resumes::repo_types::Resume;

impl Resume {
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        payload: &ResumePayload,
    ) -> Result<Resume, sqlx::Error> {
        sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes
                (user_id, name, summary, skills, experience, education, projects,
                 achievements, strengths, "references", contact, title, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, user_id, name, summary, skills, experience, education, projects,
                      achievements, strengths, "references", contact, title, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(&payload.name)
        .bind(&payload.summary)
        .bind(&payload.skills)
        .bind(&payload.experience)
        .bind(&payload.education)
        .bind(&payload.projects)
        .bind(&payload.achievements)
        .bind(&payload.strengths)
        .bind(&payload.references)
        .bind(&payload.contact)
        .bind(&payload.title)
        .bind(&payload.content)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<Resume>, sqlx::Error> {
        sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, user_id, name, summary, skills, experience, education, projects,
                   achievements, strengths, "references", contact, title, content, created_at
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Full-field replace; partial patches are not supported at this layer.
    pub async fn update(
        db: &PgPool,
        id: i64,
        payload: &ResumePayload,
    ) -> Result<Option<Resume>, sqlx::Error> {
        sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes SET
                name = $2, summary = $3, skills = $4, experience = $5, education = $6,
                projects = $7, achievements = $8, strengths = $9, "references" = $10,
                contact = $11, title = $12, content = $13
            WHERE id = $1
            RETURNING id, user_id, name, summary, skills, experience, education, projects,
                      achievements, strengths, "references", contact, title, content, created_at
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.summary)
        .bind(&payload.skills)
        .bind(&payload.experience)
        .bind(&payload.education)
        .bind(&payload.projects)
        .bind(&payload.achievements)
        .bind(&payload.strengths)
        .bind(&payload.references)
        .bind(&payload.contact)
        .bind(&payload.title)
        .bind(&payload.content)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Page through a user's resumes. Ordered by id so consecutive pages
    /// never overlap.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Resume>, sqlx::Error> {
        sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, user_id, name, summary, skills, experience, education, projects,
                   achievements, strengths, "references", contact, title, content, created_at
            FROM resumes
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }
}
