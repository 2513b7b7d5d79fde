use serde::{Deserialize, Serialize};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_CITY: &str = "Default City";
pub const DEFAULT_TOPICS: [&str; 2] = ["Default", "Topic"];
/// A conference with at most this many seats left (and at least one) is
/// "nearly sold out".
pub const NEARLY_SOLD_OUT_SEATS: i32 = 5;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub organizer_user_id: String,
    pub topics: Json<Vec<String>>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub month: i32,
    pub max_attendees: i32,
    pub seats_available: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewConferenceParams {
    pub name: String,
    pub description: Option<String>,
    pub organizer_user_id: String,
    pub topics: Option<Vec<String>>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_attendees: Option<i32>,
}

/// Fields an organizer may change after creation. Absent fields are left
/// untouched.
#[derive(Debug, Default)]
pub struct ConferenceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_attendees: Option<i32>,
}

impl Conference {
    /// Builds a conference with creation defaults applied: empty city and
    /// topics fall back to placeholders, every seat starts out available and
    /// `month` follows `start_date` (0 when there is none).
    pub fn new(params: NewConferenceParams) -> Self {
        let topics = match params.topics {
            Some(topics) if !topics.is_empty() => topics,
            _ => DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        };
        let city = match params.city {
            Some(city) if !city.is_empty() => city,
            _ => DEFAULT_CITY.to_string(),
        };
        let max_attendees = params.max_attendees.unwrap_or(0);

        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            organizer_user_id: params.organizer_user_id,
            topics: Json(topics),
            city: Some(city),
            start_date: params.start_date,
            end_date: params.end_date,
            month: month_of(params.start_date),
            max_attendees,
            seats_available: max_attendees.max(0),
            created_at: Utc::now(),
        }
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
        self.month = month_of(Some(date));
    }

    /// Share of capacity already taken, in percent. Conferences without
    /// capacity report 0.
    pub fn fill_percentage(&self) -> f64 {
        if self.max_attendees <= 0 {
            return 0.0;
        }
        let taken = (self.max_attendees - self.seats_available) as f64;
        taken / self.max_attendees as f64 * 100.0
    }

    /// Applies the fields present in `changes`. Capacity is handled by the
    /// repository, which moves both counters in one statement; this returns
    /// the requested capacity, if any.
    pub fn apply(&mut self, changes: ConferenceChanges) -> Option<i32> {
        if let Some(name) = changes.name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(topics) = changes.topics {
            self.topics = Json(topics);
        }
        if let Some(city) = changes.city {
            self.city = Some(city);
        }
        if let Some(start) = changes.start_date {
            self.set_start_date(start);
        }
        if let Some(end) = changes.end_date {
            self.end_date = Some(end);
        }
        changes.max_attendees
    }
}

fn month_of(date: Option<NaiveDate>) -> i32 {
    date.map(|d| d.month() as i32).unwrap_or(0)
}
