use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{requests::WishlistQuery, responses::DataResponse};
use crate::error::AppError;
use std::sync::Arc;

pub async fn add_to_wishlist(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let added = state.wishlist_service.add(&identity, &session_id).await?;
    Ok(Json(DataResponse { data: added }))
}

pub async fn remove_from_wishlist(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.wishlist_service.remove(&identity, &session_id).await?;
    Ok(Json(DataResponse { data: removed }))
}

pub async fn list_wishlist(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Query(params): Query<WishlistQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.wishlist_service
        .sessions(&identity, params.conference_id.as_deref())
        .await?;
    Ok(Json(sessions))
}
