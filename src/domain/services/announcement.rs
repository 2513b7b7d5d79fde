use std::sync::Arc;
use crate::domain::{
    models::conference::NEARLY_SOLD_OUT_SEATS,
    ports::{CacheStore, ConferenceRepository},
};
use crate::error::AppError;
use tracing::{debug, info};

pub const ANNOUNCEMENT_KEY: &str = "RECENT_ANNOUNCEMENTS";

pub struct AnnouncementService {
    conferences: Arc<dyn ConferenceRepository>,
    cache: Arc<dyn CacheStore>,
}

impl AnnouncementService {
    pub fn new(conferences: Arc<dyn ConferenceRepository>, cache: Arc<dyn CacheStore>) -> Self {
        Self { conferences, cache }
    }

    /// Rebuilds the "nearly sold out" announcement. Clears the cached entry
    /// and returns an empty string when no conference qualifies.
    pub async fn recalculate(&self) -> Result<String, AppError> {
        let nearly_sold_out = self.conferences.list_nearly_sold_out(NEARLY_SOLD_OUT_SEATS).await?;

        if nearly_sold_out.is_empty() {
            self.cache.delete(ANNOUNCEMENT_KEY).await?;
            debug!("No nearly sold out conferences, announcement cleared");
            return Ok(String::new());
        }

        let names: Vec<&str> = nearly_sold_out.iter().map(|c| c.name.as_str()).collect();
        let announcement = format!(
            "Last chance to attend! The following conferences are nearly sold out: {}",
            names.join(", ")
        );

        self.cache.set(ANNOUNCEMENT_KEY, &announcement).await?;
        info!("Announcement refreshed for {} conference(s)", names.len());
        Ok(announcement)
    }

    pub async fn current(&self) -> Result<String, AppError> {
        Ok(self.cache.get(ANNOUNCEMENT_KEY).await?.unwrap_or_default())
    }
}
