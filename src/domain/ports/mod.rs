use crate::domain::models::{
    conference::Conference, filter::{ConferenceQuery, FilterOperator}, job::Job, profile::{Profile, TeeShirtSize},
    session::{Session, TypeOfSession}, speaker::Speaker,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveTime;
use futures::stream::BoxStream;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Inserts the profile unless one with the same id already exists, then
    /// returns whichever is stored.
    async fn get_or_create(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError>;
    async fn update(&self, id: &str, display_name: Option<&str>, tee_shirt_size: Option<TeeShirtSize>) -> Result<Profile, AppError>;

    // Wishlist links are only ever touched through the profile
    async fn add_to_wishlist(&self, profile_id: &str, session_id: &str) -> Result<(), AppError>;
    async fn remove_from_wishlist(&self, profile_id: &str, session_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ConferenceRepository: Send + Sync {
    async fn create(&self, conference: &Conference) -> Result<Conference, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Conference>, AppError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Conference>, AppError>;
    async fn list_by_organizer(&self, organizer_user_id: &str) -> Result<Vec<Conference>, AppError>;
    async fn list_all(&self) -> Result<Vec<Conference>, AppError>;
    /// Conferences with `0 < seats_available <= max_seats`, ordered by name.
    async fn list_nearly_sold_out(&self, max_seats: i32) -> Result<Vec<Conference>, AppError>;
    /// Writes the descriptive fields and, when `max_attendees` is given,
    /// moves `seats_available` by the difference to the stored capacity in
    /// the same statement. Fails with `Conflict` if that would leave fewer
    /// than zero seats.
    async fn update(&self, conference: &Conference, max_attendees: Option<i32>) -> Result<Conference, AppError>;
    /// Lazily streams conferences matching the plan, in plan order.
    fn query(&self, query: ConferenceQuery) -> BoxStream<'_, Result<Conference, AppError>>;

    /// Adds the attendance link and takes one seat as a single transaction.
    async fn register_attendee(&self, conference_id: &str, profile_id: &str) -> Result<(), AppError>;
    /// Removes the attendance link and returns the seat as a single
    /// transaction. Returns `false` when there was no link to remove.
    async fn unregister_attendee(&self, conference_id: &str, profile_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Session>, AppError>;
    async fn list_by_conference(&self, conference_id: &str) -> Result<Vec<Session>, AppError>;
    async fn list_by_conference_and_type(&self, conference_id: &str, session_type: TypeOfSession) -> Result<Vec<Session>, AppError>;
    async fn list_by_speaker(&self, speaker_id: &str) -> Result<Vec<Session>, AppError>;
    async fn list_starting_before(&self, time: NaiveTime, session_type: TypeOfSession) -> Result<Vec<Session>, AppError>;
}

#[async_trait]
pub trait SpeakerRepository: Send + Sync {
    async fn create(&self, speaker: &Speaker) -> Result<Speaker, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Speaker>, AppError>;
    async fn list(&self) -> Result<Vec<Speaker>, AppError>;
    async fn list_by_rating(&self, operator: FilterOperator, rating: i32) -> Result<Vec<Speaker>, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    /// Claims up to `limit` due jobs by flipping them to `PROCESSING`.
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
