use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::DataResponse;
use crate::error::AppError;
use std::sync::Arc;

pub async fn register(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registered = state.registration_service.register(&identity, &id).await?;
    Ok(Json(DataResponse { data: registered }))
}

pub async fn unregister(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.registration_service.unregister(&identity, &id).await?;
    Ok(Json(DataResponse { data: removed }))
}
