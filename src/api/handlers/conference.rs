use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{ComparisonQuery, ConferenceQueryRequest, ConferenceRequest},
    responses::ConferenceResponse,
};
use crate::api::handlers::parse_optional_date;
use crate::domain::models::conference::{Conference, ConferenceChanges, NewConferenceParams};
use crate::domain::services::conference_service::ConferenceView;
use crate::error::AppError;
use std::sync::Arc;
use futures::TryStreamExt;
use tracing::info;

fn into_responses(views: Vec<ConferenceView>) -> Vec<ConferenceResponse> {
    views.into_iter().map(ConferenceResponse::from).collect()
}

pub async fn create_conference(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<ConferenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating conference {:?} for {}", payload.name, identity.user_id);

    let params = NewConferenceParams {
        name: payload.name.unwrap_or_default(),
        description: payload.description,
        organizer_user_id: identity.user_id.clone(),
        topics: payload.topics,
        city: payload.city,
        start_date: parse_optional_date(payload.start_date.as_deref())?,
        end_date: parse_optional_date(payload.end_date.as_deref())?,
        max_attendees: payload.max_attendees,
    };

    let created = state.conference_service.create(&identity, params).await?;
    let view = state.conference_service.view_of(created).await?;
    Ok(Json(ConferenceResponse::from(view)))
}

pub async fn update_conference(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ConferenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let changes = ConferenceChanges {
        name: payload.name,
        description: payload.description,
        topics: payload.topics,
        city: payload.city,
        start_date: parse_optional_date(payload.start_date.as_deref())?,
        end_date: parse_optional_date(payload.end_date.as_deref())?,
        max_attendees: payload.max_attendees,
    };

    let updated = state.conference_service.update(&identity, &id, changes).await?;
    let view = state.conference_service.view_of(updated).await?;
    Ok(Json(ConferenceResponse::from(view)))
}

pub async fn get_conference(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.conference_service.get(&id).await?;
    Ok(Json(ConferenceResponse::from(view)))
}

pub async fn conferences_created(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let views = state.conference_service.created_by(&identity).await?;
    Ok(Json(into_responses(views)))
}

pub async fn conferences_to_attend(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let views = state.conference_service.attending(&identity).await?;
    Ok(Json(into_responses(views)))
}

pub async fn query_conferences(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<ConferenceQueryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let conferences: Vec<Conference> = state.conference_service
        .query(&payload.filters)?
        .try_collect()
        .await?;

    let views = state.conference_service.with_organizers(conferences).await?;
    Ok(Json(into_responses(views)))
}

pub async fn conferences_by_fill(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<ComparisonQuery>,
) -> Result<impl IntoResponse, AppError> {
    let conferences = state.conference_service.by_fill(&params.operator, &params.value).await?;
    let views = state.conference_service.with_organizers(conferences).await?;
    Ok(Json(into_responses(views)))
}
