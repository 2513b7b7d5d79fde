use std::sync::Arc;
use crate::domain::{
    models::{profile::Identity, session::Session},
    ports::{ProfileRepository, SessionRepository},
    services::profile_service::ProfileService,
};
use crate::error::AppError;
use tracing::info;

pub const ALREADY_ADDED: &str = "You have already added this session";
pub const NOT_IN_WISHLIST: &str = "This session is not in your wishlist";

pub struct WishlistService {
    profiles: Arc<ProfileService>,
    profile_repo: Arc<dyn ProfileRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl WishlistService {
    pub fn new(profiles: Arc<ProfileService>, profile_repo: Arc<dyn ProfileRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { profiles, profile_repo, sessions }
    }

    pub async fn add(&self, identity: &Identity, session_id: &str) -> Result<bool, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;
        let session = self.find_session(session_id).await?;

        if profile.has_wishlisted(&session.id) {
            return Err(AppError::Conflict(ALREADY_ADDED.into()));
        }

        // The primary key on the link catches a concurrent duplicate
        match self.profile_repo.add_to_wishlist(&profile.id, &session.id).await {
            Ok(()) => {}
            Err(e) if e.is_unique_violation() => return Err(AppError::Conflict(ALREADY_ADDED.into())),
            Err(e) => return Err(e),
        }

        info!("Session {} added to wishlist of {}", session.id, profile.id);
        Ok(true)
    }

    /// Unlike unregistering from a conference, removing a session that is
    /// not on the wishlist is a conflict.
    pub async fn remove(&self, identity: &Identity, session_id: &str) -> Result<bool, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;
        let session = self.find_session(session_id).await?;

        if !profile.has_wishlisted(&session.id) {
            return Err(AppError::Conflict(NOT_IN_WISHLIST.into()));
        }
        if !self.profile_repo.remove_from_wishlist(&profile.id, &session.id).await? {
            return Err(AppError::Conflict(NOT_IN_WISHLIST.into()));
        }

        info!("Session {} removed from wishlist of {}", session.id, profile.id);
        Ok(true)
    }

    /// Wishlisted sessions in the order they were added, optionally limited
    /// to one conference.
    pub async fn sessions(&self, identity: &Identity, conference_id: Option<&str>) -> Result<Vec<Session>, AppError> {
        let profile = self.profiles.get_or_create(identity).await?;
        let found = self.sessions.find_by_ids(&profile.session_wishlist_keys).await?;

        let ordered = profile.session_wishlist_keys.iter()
            .filter_map(|key| found.iter().find(|s| &s.id == key))
            .filter(|s| conference_id.is_none_or(|c| s.conference_id == c))
            .cloned()
            .collect();
        Ok(ordered)
    }

    async fn find_session(&self, session_id: &str) -> Result<Session, AppError> {
        self.sessions.find_by_id(session_id).await?
            .ok_or_else(|| AppError::NotFound(format!("No session found with key: {}", session_id)))
    }
}
