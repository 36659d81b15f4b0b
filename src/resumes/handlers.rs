use axum::{
    extract::{Path, Query, State},
    http::header,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::resumes::dto::{Pagination, ResumePayload, ResumeResponse};
use crate::resumes::pdf;
use crate::resumes::repo_types::Resume;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resumes", post(create_resume))
        .route("/resumes/user/:user_id", get(list_resumes))
        .route(
            "/resumes/:id",
            axum::routing::patch(update_resume).delete(delete_resume),
        )
        .route("/resumes/:id/download", get(download_resume))
}

#[instrument(skip(state, current, payload))]
pub async fn create_resume(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<ResumePayload>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = Resume::create(&state.db, current.id, &payload).await?;
    info!(resume_id = %resume.id, user_id = %current.id, "resume created");
    Ok(Json(resume.into()))
}

#[instrument(skip(state, current))]
pub async fn list_resumes(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ResumeResponse>>, AppError> {
    if current.id != user_id {
        warn!(user_id = %current.id, target = %user_id, "resume listing on foreign account");
        return Err(AppError::Forbidden);
    }

    let (offset, limit) = pagination.clamped();
    let resumes = Resume::list_by_user(&state.db, user_id, limit, offset).await?;
    Ok(Json(resumes.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, current, payload))]
pub async fn update_resume(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ResumePayload>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = Resume::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("resume"))?;
    if resume.user_id != current.id {
        warn!(user_id = %current.id, resume_id = %id, "resume update on foreign record");
        return Err(AppError::Forbidden);
    }

    let updated = Resume::update(&state.db, id, &payload)
        .await?
        .ok_or(AppError::NotFound("resume"))?;

    info!(resume_id = %id, "resume replaced");
    Ok(Json(updated.into()))
}

#[instrument(skip(state, current))]
pub async fn delete_resume(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let resume = Resume::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("resume"))?;
    if resume.user_id != current.id {
        warn!(user_id = %current.id, resume_id = %id, "resume delete on foreign record");
        return Err(AppError::Forbidden);
    }

    Resume::delete(&state.db, id).await?;
    info!(resume_id = %id, "resume deleted");
    Ok(Json(serde_json::json!({ "message": "Resume deleted" })))
}

#[instrument(skip(state, current))]
pub async fn download_resume(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
) -> Result<([(header::HeaderName, String); 2], Vec<u8>), AppError> {
    let resume = Resume::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("resume"))?;
    if resume.user_id != current.id {
        warn!(user_id = %current.id, resume_id = %id, "resume download on foreign record");
        return Err(AppError::Forbidden);
    }

    let bytes = pdf::render(&resume)?;
    info!(resume_id = %id, size = bytes.len(), "resume rendered");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"resume_{id}.pdf\""),
        ),
    ];
    Ok((headers, bytes))
}
