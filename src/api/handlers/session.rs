use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateSessionRequest, SessionsBeforeQuery};
use crate::api::handlers::{parse_optional_date, parse_time};
use crate::domain::models::session::{NewSessionParams, TypeOfSession};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(conference_id): Path<String>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating session {:?} in conference {}", payload.name, conference_id);

    let start_time = match payload.start_time.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_time(raw)?),
        None => None,
    };

    let params = NewSessionParams {
        conference_id,
        name: payload.name.unwrap_or_default(),
        highlights: payload.highlights,
        speaker_keys: payload.speaker_keys,
        duration: payload.duration,
        type_of_session: payload.type_of_session,
        date: parse_optional_date(payload.date.as_deref())?,
        start_time,
    };

    let session = state.catalog_service.create_session(&identity, params).await?;
    Ok(Json(session))
}

pub async fn list_conference_sessions(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(conference_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.catalog_service.conference_sessions(&conference_id).await?;
    Ok(Json(sessions))
}

pub async fn list_sessions_by_type(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path((conference_id, session_type)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session_type: TypeOfSession = session_type.parse().map_err(AppError::Validation)?;
    let sessions = state.catalog_service.conference_sessions_by_type(&conference_id, session_type).await?;
    Ok(Json(sessions))
}

pub async fn sessions_before(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<SessionsBeforeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let time = parse_time(&params.time)?;
    let session_type: TypeOfSession = params.session_type.parse().map_err(AppError::Validation)?;
    let sessions = state.catalog_service.sessions_before(time, session_type).await?;
    Ok(Json(sessions))
}
