use crate::domain::{models::conference::Conference, services::conference_service::ConferenceView};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceResponse {
    #[serde(flatten)]
    pub conference: Conference,
    pub organizer_display_name: Option<String>,
}

impl From<ConferenceView> for ConferenceResponse {
    fn from(view: ConferenceView) -> Self {
        Self { conference: view.conference, organizer_display_name: view.organizer_display_name }
    }
}

/// Envelope for bare boolean and string results.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
