use std::sync::Arc;
use chrono::NaiveTime;
use crate::domain::{
    models::{
        filter::FilterOperator,
        job::JobPayload,
        profile::Identity,
        session::{NewSessionParams, Session, TypeOfSession},
        speaker::Speaker,
    },
    ports::{ConferenceRepository, JobRepository, SessionRepository, SpeakerRepository},
    services::dispatch::enqueue,
};
use crate::error::AppError;
use tracing::info;

pub struct CatalogService {
    conferences: Arc<dyn ConferenceRepository>,
    sessions: Arc<dyn SessionRepository>,
    speakers: Arc<dyn SpeakerRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl CatalogService {
    pub fn new(
        conferences: Arc<dyn ConferenceRepository>,
        sessions: Arc<dyn SessionRepository>,
        speakers: Arc<dyn SpeakerRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self { conferences, sessions, speakers, jobs }
    }

    /// Adds a session to a conference the caller organizes. The featured
    /// speaker is worked out afterwards by a queued job.
    pub async fn create_session(&self, identity: &Identity, params: NewSessionParams) -> Result<Session, AppError> {
        if params.name.trim().is_empty() {
            return Err(AppError::Validation("Session 'name' field required".into()));
        }

        let conference = self.conferences.find_by_id(&params.conference_id).await?
            .ok_or_else(|| AppError::NotFound(format!("No conference found with key: {}", params.conference_id)))?;

        if conference.organizer_user_id != identity.user_id {
            return Err(AppError::Forbidden("Only the owner can add sessions to the conference".into()));
        }

        if let (Some(date), Some(start), Some(end)) = (params.date, conference.start_date, conference.end_date)
            && (date < start || date > end) {
            return Err(AppError::Validation("Session date must lie within the conference dates".into()));
        }

        for key in &params.speaker_keys {
            if self.speakers.find_by_id(key).await?.is_none() {
                return Err(AppError::NotFound(format!("No speaker found with key: {}", key)));
            }
        }

        let session = self.sessions.create(&Session::new(params)).await?;
        info!("Session {} added to conference {}", session.id, conference.id);

        enqueue(self.jobs.as_ref(), JobPayload::FeaturedSpeaker {
            conference_id: conference.id,
            session_id: session.id.clone(),
        }).await;

        Ok(session)
    }

    pub async fn conference_sessions(&self, conference_id: &str) -> Result<Vec<Session>, AppError> {
        self.ensure_conference(conference_id).await?;
        self.sessions.list_by_conference(conference_id).await
    }

    pub async fn conference_sessions_by_type(&self, conference_id: &str, session_type: TypeOfSession) -> Result<Vec<Session>, AppError> {
        self.ensure_conference(conference_id).await?;
        self.sessions.list_by_conference_and_type(conference_id, session_type).await
    }

    pub async fn sessions_by_speaker(&self, speaker_id: &str) -> Result<Vec<Session>, AppError> {
        self.speakers.find_by_id(speaker_id).await?
            .ok_or_else(|| AppError::NotFound(format!("No speaker found with key: {}", speaker_id)))?;
        self.sessions.list_by_speaker(speaker_id).await
    }

    /// Sessions of the given type starting strictly before `time`.
    pub async fn sessions_before(&self, time: NaiveTime, session_type: TypeOfSession) -> Result<Vec<Session>, AppError> {
        self.sessions.list_starting_before(time, session_type).await
    }

    pub async fn create_speaker(
        &self,
        name: String,
        organization: Option<String>,
        bio: Option<String>,
        rating: Option<i32>,
    ) -> Result<Speaker, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Speaker 'name' field required".into()));
        }
        let speaker = self.speakers.create(&Speaker::new(name, organization, bio, rating)).await?;
        info!("Speaker {} created", speaker.id);
        Ok(speaker)
    }

    pub async fn list_speakers(&self) -> Result<Vec<Speaker>, AppError> {
        self.speakers.list().await
    }

    pub async fn speakers_by_rating(&self, operator: &str, value: &str) -> Result<Vec<Speaker>, AppError> {
        let op = FilterOperator::from_token(operator)
            .ok_or_else(|| AppError::InvalidFilter(format!("Unknown operator: {}", operator)))?;
        let rating: i32 = value.trim().parse()
            .map_err(|_| AppError::InvalidValue(format!("Rating must be an integer: {}", value)))?;
        self.speakers.list_by_rating(op, rating).await
    }

    async fn ensure_conference(&self, conference_id: &str) -> Result<(), AppError> {
        self.conferences.find_by_id(conference_id).await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("No conference found with key: {}", conference_id)))
    }
}
