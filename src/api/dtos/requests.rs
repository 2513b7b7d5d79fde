use crate::domain::models::{filter::RawFilter, profile::TeeShirtSize, session::TypeOfSession};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub display_name: Option<String>,
    pub tee_shirt_size: Option<TeeShirtSize>,
}

/// Used for both create and update. On update, absent fields are left
/// unchanged and `seatsAvailable` is not accepted at all.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_attendees: Option<i32>,
}

#[derive(Deserialize)]
pub struct ConferenceQueryRequest {
    #[serde(default)]
    pub filters: Vec<RawFilter>,
}

/// `?operator=&value=` for the single-criterion queries.
#[derive(Deserialize)]
pub struct ComparisonQuery {
    pub operator: String,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub name: Option<String>,
    pub highlights: Option<String>,
    #[serde(default)]
    pub speaker_keys: Vec<String>,
    pub duration: Option<i32>,
    pub type_of_session: Option<TypeOfSession>,
    pub date: Option<String>,
    pub start_time: Option<String>,
}

#[derive(Deserialize)]
pub struct SessionsBeforeQuery {
    pub time: String,
    #[serde(rename = "type")]
    pub session_type: String,
}

#[derive(Deserialize)]
pub struct WishlistQuery {
    pub conference_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSpeakerRequest {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
    pub rating: Option<i32>,
}
