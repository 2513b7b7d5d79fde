use std::collections::HashMap;
use std::sync::Arc;
use futures::stream::BoxStream;
use crate::domain::{
    models::{
        conference::{Conference, ConferenceChanges, NewConferenceParams},
        filter::{ConferenceQuery, FilterOperator, RawFilter},
        job::JobPayload,
        profile::Identity,
    },
    ports::{ConferenceRepository, JobRepository, ProfileRepository},
    services::{dispatch::enqueue, filters::normalize_filters, profile_service::ProfileService},
};
use crate::error::AppError;
use tracing::info;

/// A conference together with its organizer's display name, as shown to
/// callers.
#[derive(Debug, Clone)]
pub struct ConferenceView {
    pub conference: Conference,
    pub organizer_display_name: Option<String>,
}

pub struct ConferenceService {
    profiles: Arc<ProfileService>,
    profile_repo: Arc<dyn ProfileRepository>,
    conferences: Arc<dyn ConferenceRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl ConferenceService {
    pub fn new(
        profiles: Arc<ProfileService>,
        profile_repo: Arc<dyn ProfileRepository>,
        conferences: Arc<dyn ConferenceRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self { profiles, profile_repo, conferences, jobs }
    }

    pub async fn create(&self, identity: &Identity, mut params: NewConferenceParams) -> Result<Conference, AppError> {
        if params.name.trim().is_empty() {
            return Err(AppError::Validation("Conference 'name' field required".into()));
        }
        if let (Some(start), Some(end)) = (params.start_date, params.end_date)
            && end < start {
            return Err(AppError::Validation("End date must not be before start date".into()));
        }
        if params.max_attendees.is_some_and(|m| m < 0) {
            return Err(AppError::Validation("maxAttendees must not be negative".into()));
        }

        let organizer = self.profiles.get_or_create(identity).await?;
        params.organizer_user_id = organizer.id.clone();

        let created = self.conferences.create(&Conference::new(params)).await?;
        info!("Conference {} created by {}", created.id, organizer.id);

        enqueue(self.jobs.as_ref(), JobPayload::ConfirmationEmail {
            recipient: identity.email.clone(),
            conference_id: created.id.clone(),
        }).await;
        enqueue(self.jobs.as_ref(), JobPayload::Announcement).await;

        Ok(created)
    }

    /// Applies an organizer's changes. Capacity changes move the free seats
    /// by the same amount; taken seats are never given away.
    pub async fn update(&self, identity: &Identity, conference_id: &str, changes: ConferenceChanges) -> Result<Conference, AppError> {
        let mut conference = self.find(conference_id).await?;

        if conference.organizer_user_id != identity.user_id {
            return Err(AppError::Forbidden("Only the owner can update the conference".into()));
        }

        let capacity = conference.apply(changes);
        if let (Some(start), Some(end)) = (conference.start_date, conference.end_date)
            && end < start {
            return Err(AppError::Validation("End date must not be before start date".into()));
        }
        if capacity.is_some_and(|max| max < 0) {
            return Err(AppError::Validation("maxAttendees must not be negative".into()));
        }

        let updated = self.conferences.update(&conference, capacity).await?;
        info!("Conference {} updated (capacity {})", updated.id, updated.max_attendees);

        enqueue(self.jobs.as_ref(), JobPayload::Announcement).await;
        Ok(updated)
    }

    pub async fn get(&self, conference_id: &str) -> Result<ConferenceView, AppError> {
        let conference = self.find(conference_id).await?;
        self.view_of(conference).await
    }

    pub async fn view_of(&self, conference: Conference) -> Result<ConferenceView, AppError> {
        let mut views = self.with_organizers(vec![conference]).await?;
        views.pop().ok_or(AppError::Internal)
    }

    pub async fn created_by(&self, identity: &Identity) -> Result<Vec<ConferenceView>, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;
        let conferences = self.conferences.list_by_organizer(&profile.id).await?;
        self.with_organizers(conferences).await
    }

    /// Conferences the caller is registered for, in registration order.
    pub async fn attending(&self, identity: &Identity) -> Result<Vec<ConferenceView>, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;
        let mut found: HashMap<String, Conference> = self.conferences
            .find_by_ids(&profile.conference_keys_to_attend).await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let ordered = profile.conference_keys_to_attend.iter()
            .filter_map(|key| found.remove(key))
            .collect();
        self.with_organizers(ordered).await
    }

    /// Validates the filters and returns the matching conferences as a lazy
    /// stream. Filter errors surface before any row is read.
    pub fn query(&self, raw: &[RawFilter]) -> Result<BoxStream<'_, Result<Conference, AppError>>, AppError> {
        let normalized = normalize_filters(raw)?;
        Ok(self.conferences.query(ConferenceQuery::build(normalized)))
    }

    /// Conferences whose fill percentage satisfies `operator` against
    /// `value`, ordered by name.
    pub async fn by_fill(&self, operator: &str, value: &str) -> Result<Vec<Conference>, AppError> {
        let op = FilterOperator::from_token(operator)
            .ok_or_else(|| AppError::InvalidFilter(format!("Unknown operator: {}", operator)))?;
        let threshold: f64 = value.trim().parse()
            .map_err(|_| AppError::InvalidValue(format!("Fill percentage must be a number: {}", value)))?;

        let matching = self.conferences.list_all().await?
            .into_iter()
            .filter(|c| op.compare(c.fill_percentage(), threshold))
            .collect();
        Ok(matching)
    }

    /// Attaches organizer display names, looking each organizer up once.
    pub async fn with_organizers(&self, conferences: Vec<Conference>) -> Result<Vec<ConferenceView>, AppError> {
        let mut names: HashMap<String, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(conferences.len());

        for conference in conferences {
            if !names.contains_key(&conference.organizer_user_id) {
                let name = self.profile_repo.find_by_id(&conference.organizer_user_id).await?
                    .map(|p| p.display_name);
                names.insert(conference.organizer_user_id.clone(), name);
            }
            let organizer_display_name = names.get(&conference.organizer_user_id).cloned().flatten();
            views.push(ConferenceView { conference, organizer_display_name });
        }
        Ok(views)
    }

    async fn find(&self, conference_id: &str) -> Result<Conference, AppError> {
        self.conferences.find_by_id(conference_id).await?
            .ok_or_else(|| AppError::NotFound(format!("No conference found with key: {}", conference_id)))
    }
}
