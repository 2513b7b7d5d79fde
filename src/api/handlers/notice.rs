use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::DataResponse;
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_announcement(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let announcement = state.announcement_service.current().await?;
    Ok(Json(DataResponse { data: announcement }))
}

pub async fn get_featured_speaker(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(conference_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let notice = state.featured_speaker_service.current(&conference_id).await?;
    Ok(Json(DataResponse { data: notice }))
}
