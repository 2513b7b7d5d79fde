use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::SaveProfileRequest;
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profile_service.get_or_create(&identity).await?;
    Ok(Json(profile))
}

pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<SaveProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profile_service
        .save(&identity, payload.display_name, payload.tee_shirt_size)
        .await?;
    Ok(Json(profile))
}
