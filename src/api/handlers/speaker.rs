use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{ComparisonQuery, CreateSpeakerRequest};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_speaker(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CreateSpeakerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let speaker = state.catalog_service
        .create_speaker(payload.name.unwrap_or_default(), payload.organization, payload.bio, payload.rating)
        .await?;
    Ok(Json(speaker))
}

pub async fn list_speakers(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.catalog_service.list_speakers().await?))
}

pub async fn speakers_by_rating(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<ComparisonQuery>,
) -> Result<impl IntoResponse, AppError> {
    let speakers = state.catalog_service.speakers_by_rating(&params.operator, &params.value).await?;
    Ok(Json(speakers))
}

pub async fn sessions_by_speaker(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(speaker_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.catalog_service.sessions_by_speaker(&speaker_id).await?;
    Ok(Json(sessions))
}
