use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::users::repo_types::{UpdateProfile, User};

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(d) if d.is_unique_violation())
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with hashed password.
    pub async fn create(db: &PgPool, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Create an externally-authenticated account: empty password hash,
    /// display name from the identity claim.
    pub async fn create_external(
        db: &PgPool,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, full_name)
            VALUES ($1, '', $2)
            RETURNING id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            "#,
        )
        .bind(email)
        .bind(full_name)
        .fetch_one(db)
        .await
    }

    /// Find the account for an externally-verified email, creating it on
    /// first login. Concurrent first logins race on the unique email
    /// constraint; losing the race means someone else just created the row,
    /// so re-read once and proceed with the existing record.
    pub async fn find_or_create_external(
        db: &PgPool,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<User, AppError> {
        if let Some(user) = User::find_by_email(db, email).await? {
            return Ok(user);
        }

        match User::create_external(db, email, full_name).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "external account created");
                Ok(user)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(email = %email, "lost external-account creation race, re-reading");
                User::find_by_email(db, email)
                    .await?
                    .ok_or(AppError::AccountNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Merge the allow-listed profile fields into the row. Absent fields
    /// keep their stored value.
    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        update: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                full_name = COALESCE($2, full_name),
                bio = COALESCE($3, bio),
                phone = COALESCE($4, phone),
                profile_picture = COALESCE($5, profile_picture)
            WHERE id = $1
            RETURNING id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            "#,
        )
        .bind(id)
        .bind(update.full_name.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.profile_picture.as_deref())
        .fetch_optional(db)
        .await
    }

    pub async fn set_profile_picture(
        db: &PgPool,
        id: i64,
        path: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET profile_picture = $2
            WHERE id = $1
            RETURNING id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            "#,
        )
        .bind(id)
        .bind(path)
        .fetch_optional(db)
        .await
    }

    /// Replace the password hash after verifying the old password, all
    /// inside one transaction so the read-verify-write is atomic.
    pub async fn change_password(
        db: &PgPool,
        id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, full_name, bio, phone, profile_picture, created_at
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("user"))?;

        if !verify_password(old_password, &user.password_hash) {
            return Err(AppError::WrongPassword);
        }

        let new_hash = hash_password(new_password)?;
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(&new_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(user_id = %id, "password changed");
        Ok(())
    }
}
