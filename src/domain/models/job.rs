use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_PROCESSING: &str = "PROCESSING";
pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_FAILED: &str = "FAILED";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum JobPayload {
    ConfirmationEmail { recipient: String, conference_id: String },
    FeaturedSpeaker { conference_id: String, session_id: String },
    Announcement,
}

impl JobPayload {
    pub fn job_type(&self) -> &'static str {
        match self {
            JobPayload::ConfirmationEmail { .. } => "CONFIRMATION_EMAIL",
            JobPayload::FeaturedSpeaker { .. } => "FEATURED_SPEAKER",
            JobPayload::Announcement => "ANNOUNCEMENT",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Job {
    pub id: String,
    pub job_type: String,
    pub payload: Json<JobPayload>,
    pub execute_at: DateTime<Utc>,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(payload: JobPayload) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            job_type: payload.job_type().to_string(),
            payload: Json(payload),
            execute_at: now,
            status: STATUS_PENDING.to_string(),
            error_message: None,
            created_at: now,
        }
    }
}
