use std::sync::Arc;
use crate::domain::{
    models::profile::{Identity, Profile, TeeShirtSize},
    ports::ProfileRepository,
};
use crate::error::AppError;
use tracing::info;

pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Returns the caller's profile, creating it on first access.
    pub async fn get_or_create(&self, identity: &Identity) -> Result<Profile, AppError> {
        let fresh = Profile::new(identity.user_id.clone(), identity.display_name(), identity.email.clone());
        self.repo.get_or_create(&fresh).await
    }

    pub async fn save(
        &self,
        identity: &Identity,
        display_name: Option<String>,
        tee_shirt_size: Option<TeeShirtSize>,
    ) -> Result<Profile, AppError> {
        self.get_or_create(identity).await?;

        let display_name = display_name.filter(|name| !name.trim().is_empty());
        if display_name.is_none() && tee_shirt_size.is_none() {
            return self.get_or_create(identity).await;
        }

        let updated = self.repo.update(&identity.user_id, display_name.as_deref(), tee_shirt_size).await?;
        info!("Profile {} updated", updated.id);
        Ok(updated)
    }
}
