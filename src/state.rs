use std::sync::Arc;
use sqlx::SqlitePool;
use crate::domain::ports::{
    CacheStore, ConferenceRepository, EmailService, JobRepository, ProfileRepository,
    SessionRepository, SpeakerRepository,
};
use crate::domain::services::{
    announcement::AnnouncementService, catalog::CatalogService, conference_service::ConferenceService,
    featured_speaker::FeaturedSpeakerService, profile_service::ProfileService,
    registration::RegistrationService, wishlist::WishlistService,
};
use crate::infra::repositories::{
    sqlite_conference_repo::SqliteConferenceRepo, sqlite_job_repo::SqliteJobRepo,
    sqlite_profile_repo::SqliteProfileRepo, sqlite_session_repo::SqliteSessionRepo,
    sqlite_speaker_repo::SqliteSpeakerRepo,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub conference_repo: Arc<dyn ConferenceRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub speaker_repo: Arc<dyn SpeakerRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub cache: Arc<dyn CacheStore>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
    pub profile_service: Arc<ProfileService>,
    pub conference_service: Arc<ConferenceService>,
    pub registration_service: Arc<RegistrationService>,
    pub wishlist_service: Arc<WishlistService>,
    pub catalog_service: Arc<CatalogService>,
    pub announcement_service: Arc<AnnouncementService>,
    pub featured_speaker_service: Arc<FeaturedSpeakerService>,
}

impl AppState {
    /// Wires the SQLite repositories and the services on top of them. The
    /// cache and mail sender are passed in so tests can substitute their own.
    pub fn new(
        config: Config,
        pool: SqlitePool,
        cache: Arc<dyn CacheStore>,
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
    ) -> Self {
        let profile_repo: Arc<dyn ProfileRepository> = Arc::new(SqliteProfileRepo::new(pool.clone()));
        let conference_repo: Arc<dyn ConferenceRepository> = Arc::new(SqliteConferenceRepo::new(pool.clone()));
        let session_repo: Arc<dyn SessionRepository> = Arc::new(SqliteSessionRepo::new(pool.clone()));
        let speaker_repo: Arc<dyn SpeakerRepository> = Arc::new(SqliteSpeakerRepo::new(pool.clone()));
        let job_repo: Arc<dyn JobRepository> = Arc::new(SqliteJobRepo::new(pool));

        let profile_service = Arc::new(ProfileService::new(profile_repo.clone()));

        Self {
            conference_service: Arc::new(ConferenceService::new(
                profile_service.clone(), profile_repo.clone(), conference_repo.clone(), job_repo.clone(),
            )),
            registration_service: Arc::new(RegistrationService::new(
                profile_service.clone(), conference_repo.clone(), job_repo.clone(),
            )),
            wishlist_service: Arc::new(WishlistService::new(
                profile_service.clone(), profile_repo.clone(), session_repo.clone(),
            )),
            catalog_service: Arc::new(CatalogService::new(
                conference_repo.clone(), session_repo.clone(), speaker_repo.clone(), job_repo.clone(),
            )),
            announcement_service: Arc::new(AnnouncementService::new(conference_repo.clone(), cache.clone())),
            featured_speaker_service: Arc::new(FeaturedSpeakerService::new(
                session_repo.clone(), speaker_repo.clone(), cache.clone(),
            )),
            profile_service,
            config,
            profile_repo,
            conference_repo,
            session_repo,
            speaker_repo,
            job_repo,
            cache,
            email_service,
            templates,
        }
    }
}
