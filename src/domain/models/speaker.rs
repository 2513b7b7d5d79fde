use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub organization: Option<String>,
    pub bio: Option<String>,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Speaker {
    pub fn new(name: String, organization: Option<String>, bio: Option<String>, rating: Option<i32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            organization,
            bio,
            rating,
            created_at: Utc::now(),
        }
    }
}
