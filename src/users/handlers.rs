use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::users::dto::{ChangePasswordRequest, PictureResponse, ProfileResponse};
use crate::users::repo_types::{UpdateProfile, User};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:id/profile",
            get(get_profile).patch(update_profile),
        )
        .route("/users/email/:email", get(get_by_email))
        .route("/users/:id/change-password", post(change_password))
        .route(
            "/users/:id/upload-profile-picture",
            post(upload_profile_picture),
        )
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024))
}

#[instrument(skip(state, _current))]
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, _current))]
pub async fn get_by_email(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(email): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = User::find_by_email(&state.db, &email.trim().to_lowercase())
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, current, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateProfile>,
) -> Result<Json<ProfileResponse>, AppError> {
    if current.id != user_id {
        warn!(user_id = %current.id, target = %user_id, "profile update on foreign account");
        return Err(AppError::Forbidden);
    }

    let user = User::update_profile(&state.db, user_id, &payload)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, current, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if current.id != user_id {
        warn!(user_id = %current.id, target = %user_id, "password change on foreign account");
        return Err(AppError::Forbidden);
    }

    User::change_password(&state.db, user_id, &payload.old_password, &payload.new_password)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Password changed successfully" })))
}

#[instrument(skip(state, current, multipart))]
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<PictureResponse>, AppError> {
    if current.id != user_id {
        warn!(user_id = %current.id, target = %user_id, "picture upload on foreign account");
        return Err(AppError::Forbidden);
    }

    let mut stored: Option<String> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .and_then(|n| n.rsplit(['/', '\\']).next())
            .filter(|n| !n.is_empty())
            .unwrap_or("upload")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::Validation("invalid multipart body".into()))?;

        let dir = std::path::Path::new(&state.config.media_dir).join("profile_pics");
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(anyhow::Error::from)?;
        let file_name = format!("user_{user_id}_{filename}");
        tokio::fs::write(dir.join(&file_name), &data)
            .await
            .map_err(anyhow::Error::from)?;

        stored = Some(format!("{}/profile_pics/{}", state.config.media_dir, file_name));
        break;
    }

    let path = stored.ok_or_else(|| AppError::Validation("file field is required".into()))?;

    User::set_profile_picture(&state.db, user_id, &path)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    info!(user_id = %user_id, path = %path, "profile picture uploaded");
    Ok(Json(PictureResponse {
        profile_picture: path,
    }))
}
