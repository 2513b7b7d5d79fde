use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, profile, conference, registration, session, speaker, wishlist, notice};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Profile
        .route("/api/v1/profile", get(profile::get_profile).post(profile::save_profile))

        // Conferences
        .route("/api/v1/conferences", post(conference::create_conference))
        .route("/api/v1/conferences/created", get(conference::conferences_created))
        .route("/api/v1/conferences/attending", get(conference::conferences_to_attend))
        .route("/api/v1/conferences/query", post(conference::query_conferences))
        .route("/api/v1/conferences/by-fill", get(conference::conferences_by_fill))
        .route("/api/v1/conferences/{id}", get(conference::get_conference).put(conference::update_conference))

        // Registration
        .route("/api/v1/conferences/{id}/registration", post(registration::register).delete(registration::unregister))

        // Sessions
        .route("/api/v1/conferences/{id}/sessions", get(session::list_conference_sessions).post(session::create_session))
        .route("/api/v1/conferences/{id}/sessions/type/{type}", get(session::list_sessions_by_type))
        .route("/api/v1/sessions/before", get(session::sessions_before))

        // Wishlist
        .route("/api/v1/sessions/{id}/wishlist", post(wishlist::add_to_wishlist).delete(wishlist::remove_from_wishlist))
        .route("/api/v1/wishlist", get(wishlist::list_wishlist))

        // Speakers
        .route("/api/v1/speakers", get(speaker::list_speakers).post(speaker::create_speaker))
        .route("/api/v1/speakers/by-rating", get(speaker::speakers_by_rating))
        .route("/api/v1/speakers/{id}/sessions", get(speaker::sessions_by_speaker))

        // Cached notices
        .route("/api/v1/announcement", get(notice::get_announcement))
        .route("/api/v1/conferences/{id}/featured-speaker", get(notice::get_featured_speaker))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
