use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeOfSession {
    #[default]
    #[serde(rename = "Not_Specified")]
    #[sqlx(rename = "Not_Specified")]
    NotSpecified,
    Keynote,
    Lecture,
    Workshop,
    Demonstration,
}

impl FromStr for TypeOfSession {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not_Specified" => Ok(Self::NotSpecified),
            "Keynote" => Ok(Self::Keynote),
            "Lecture" => Ok(Self::Lecture),
            "Workshop" => Ok(Self::Workshop),
            "Demonstration" => Ok(Self::Demonstration),
            other => Err(format!("Unknown session type: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub conference_id: String,
    pub name: String,
    pub highlights: Option<String>,
    pub speaker_keys: Json<Vec<String>>,
    pub duration: Option<i32>,
    pub type_of_session: TypeOfSession,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

pub struct NewSessionParams {
    pub conference_id: String,
    pub name: String,
    pub highlights: Option<String>,
    pub speaker_keys: Vec<String>,
    pub duration: Option<i32>,
    pub type_of_session: Option<TypeOfSession>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
}

impl Session {
    pub fn new(params: NewSessionParams) -> Self {
        let mut speaker_keys = Vec::with_capacity(params.speaker_keys.len());
        for key in params.speaker_keys {
            if !speaker_keys.contains(&key) {
                speaker_keys.push(key);
            }
        }

        Self {
            id: Uuid::new_v4().to_string(),
            conference_id: params.conference_id,
            name: params.name,
            highlights: params.highlights,
            speaker_keys: Json(speaker_keys),
            duration: params.duration,
            type_of_session: params.type_of_session.unwrap_or_default(),
            date: params.date,
            start_time: params.start_time,
            created_at: Utc::now(),
        }
    }

    pub fn shares_speaker_with(&self, other: &Session) -> bool {
        self.speaker_keys.iter().any(|k| other.speaker_keys.contains(k))
    }
}
