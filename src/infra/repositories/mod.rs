pub mod sqlite_conference_repo;
pub mod sqlite_job_repo;
pub mod sqlite_profile_repo;
pub mod sqlite_session_repo;
pub mod sqlite_speaker_repo;
