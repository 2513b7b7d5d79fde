use std::sync::Arc;
use crate::domain::{
    models::{job::JobPayload, profile::Identity},
    ports::{ConferenceRepository, JobRepository},
    services::{dispatch::enqueue, profile_service::ProfileService},
};
use crate::error::AppError;
use tracing::info;

pub const ALREADY_REGISTERED: &str = "You have already registered for this conference";
pub const NO_SEATS_AVAILABLE: &str = "There are no seats available";

pub struct RegistrationService {
    profiles: Arc<ProfileService>,
    conferences: Arc<dyn ConferenceRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl RegistrationService {
    pub fn new(profiles: Arc<ProfileService>, conferences: Arc<dyn ConferenceRepository>, jobs: Arc<dyn JobRepository>) -> Self {
        Self { profiles, conferences, jobs }
    }

    /// Takes a seat for the caller. The link insert and the seat decrement
    /// commit together; the repository re-checks both under the transaction,
    /// so a racing caller cannot take the last seat twice.
    pub async fn register(&self, identity: &Identity, conference_id: &str) -> Result<bool, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;

        let conference = self.conferences.find_by_id(conference_id).await?
            .ok_or_else(|| AppError::NotFound(format!("No conference found with key: {}", conference_id)))?;

        if profile.is_attending(&conference.id) {
            return Err(AppError::Conflict(ALREADY_REGISTERED.into()));
        }
        if conference.seats_available <= 0 {
            return Err(AppError::Conflict(NO_SEATS_AVAILABLE.into()));
        }

        self.conferences.register_attendee(&conference.id, &profile.id).await?;
        info!("Profile {} registered for conference {}", profile.id, conference.id);

        enqueue(self.jobs.as_ref(), JobPayload::Announcement).await;
        Ok(true)
    }

    /// Gives the caller's seat back. Not being registered is not an error:
    /// the call reports `false` and changes nothing.
    pub async fn unregister(&self, identity: &Identity, conference_id: &str) -> Result<bool, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;

        let conference = self.conferences.find_by_id(conference_id).await?
            .ok_or_else(|| AppError::NotFound(format!("No conference found with key: {}", conference_id)))?;

        if !profile.is_attending(&conference.id) {
            return Ok(false);
        }

        let removed = self.conferences.unregister_attendee(&conference.id, &profile.id).await?;
        if removed {
            info!("Profile {} unregistered from conference {}", profile.id, conference.id);
            enqueue(self.jobs.as_ref(), JobPayload::Announcement).await;
        }
        Ok(removed)
    }
}
