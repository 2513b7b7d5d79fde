use std::sync::Arc;
use crate::domain::{
    models::session::Session,
    ports::{CacheStore, SessionRepository, SpeakerRepository},
};
use crate::error::AppError;
use tracing::{debug, info, warn};

pub fn featured_speaker_key(conference_id: &str) -> String {
    format!("FEATURED_SPEAKER_{}", conference_id)
}

pub struct FeaturedSpeakerService {
    sessions: Arc<dyn SessionRepository>,
    speakers: Arc<dyn SpeakerRepository>,
    cache: Arc<dyn CacheStore>,
}

impl FeaturedSpeakerService {
    pub fn new(sessions: Arc<dyn SessionRepository>, speakers: Arc<dyn SpeakerRepository>, cache: Arc<dyn CacheStore>) -> Self {
        Self { sessions, speakers, cache }
    }

    /// Looks for other sessions of the conference sharing a speaker with the
    /// newly added one. On a match the cached notice for the conference is
    /// replaced; otherwise the cache is left alone and `""` is returned.
    pub async fn recalculate(&self, conference_id: &str, session_id: &str) -> Result<String, AppError> {
        let Some(new_session) = self.sessions.find_by_id(session_id).await? else {
            warn!("Session {} vanished before featured speaker recalculation", session_id);
            return Ok(String::new());
        };

        let mut matches: Vec<Session> = Vec::new();
        for other in self.sessions.list_by_conference(conference_id).await? {
            if other.id == new_session.id || matches.iter().any(|m| m.id == other.id) {
                continue;
            }
            if other.shares_speaker_with(&new_session) {
                matches.push(other);
            }
        }

        if matches.is_empty() {
            debug!("No speaker overlap for session {}", session_id);
            return Ok(String::new());
        }

        let Some(speaker_key) = new_session.speaker_keys.iter()
            .find(|key| matches.iter().any(|m| m.speaker_keys.contains(*key)))
        else {
            return Ok(String::new());
        };

        let speaker = self.speakers.find_by_id(speaker_key).await?
            .ok_or_else(|| AppError::NotFound(format!("No speaker found with key: {}", speaker_key)))?;

        matches.push(new_session);
        let names: Vec<&str> = matches.iter().map(|s| s.name.as_str()).collect();
        let notice = format!("Featured speaker: {}\nSessions: {}", speaker.name, names.join(", "));

        self.cache.set(&featured_speaker_key(conference_id), &notice).await?;
        info!("Featured speaker for conference {} set to {}", conference_id, speaker.name);
        Ok(notice)
    }

    pub async fn current(&self, conference_id: &str) -> Result<String, AppError> {
        Ok(self.cache.get(&featured_speaker_key(conference_id)).await?.unwrap_or_default())
    }
}
