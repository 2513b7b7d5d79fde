use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{error, info, warn, info_span, Instrument};
use crate::state::AppState;
use crate::domain::models::job::{Job, JobPayload, STATUS_COMPLETED, STATUS_FAILED};
use crate::error::AppError;
use crate::infra::factory::CONFIRMATION_TEMPLATE;

const BATCH_SIZE: i32 = 10;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    let poll_interval = Duration::from_secs(state.config.job_poll_interval_secs.max(1));
    let refresh_interval = Duration::from_secs(state.config.announcement_refresh_secs.max(1));

    refresh_announcement(&state).await;
    let mut last_refresh = Instant::now();

    loop {
        process_pending_jobs(&state).await;

        if last_refresh.elapsed() >= refresh_interval {
            refresh_announcement(&state).await;
            last_refresh = Instant::now();
        }

        sleep(poll_interval).await;
    }
}

/// Claims one batch of due jobs and runs them in creation order. Returns the
/// number of jobs claimed.
pub async fn process_pending_jobs(state: &Arc<AppState>) -> usize {
    let jobs = match state.job_repo.find_pending(BATCH_SIZE).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to fetch pending jobs: {:?}", e);
            return 0;
        }
    };
    let claimed = jobs.len();

    for job in jobs {
        let span = info_span!(
            "background_job",
            job_id = %job.id,
            job_type = %job.job_type
        );

        async {
            info!("Processing job");
            match process_job(state, &job).await {
                Ok(()) => {
                    info!("Job completed successfully");
                    if let Err(e) = state.job_repo.update_status(&job.id, STATUS_COMPLETED, None).await {
                        error!("Failed to mark job as completed: {:?}", e);
                    }
                }
                Err(e) => {
                    let err_msg = format!("{}", e);
                    error!("Job failed with error: {}", err_msg);
                    if let Err(up_err) = state.job_repo.update_status(&job.id, STATUS_FAILED, Some(err_msg)).await {
                        error!("Failed to mark job as failed: {:?}", up_err);
                    }
                }
            }
        }
            .instrument(span)
            .await;
    }

    claimed
}

async fn refresh_announcement(state: &Arc<AppState>) {
    if let Err(e) = state.announcement_service.recalculate().await {
        warn!("Scheduled announcement refresh failed: {:?}", e);
    }
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    match &job.payload.0 {
        JobPayload::ConfirmationEmail { recipient, conference_id } => {
            send_confirmation(state, recipient, conference_id).await
        }
        JobPayload::FeaturedSpeaker { conference_id, session_id } => {
            state.featured_speaker_service.recalculate(conference_id, session_id).await?;
            Ok(())
        }
        JobPayload::Announcement => {
            state.announcement_service.recalculate().await?;
            Ok(())
        }
    }
}

async fn send_confirmation(state: &Arc<AppState>, recipient: &str, conference_id: &str) -> Result<(), AppError> {
    let conference = state.conference_repo.find_by_id(conference_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Conference {} not found", conference_id)))?;
    let organizer = state.profile_repo.find_by_id(&conference.organizer_user_id).await?;

    let mut context = tera::Context::new();
    context.insert("organizer_name", &organizer.map(|p| p.display_name).unwrap_or_default());
    context.insert("name", &conference.name);
    context.insert("description", &conference.description);
    context.insert("city", conference.city.as_deref().unwrap_or_default());
    context.insert("topics", &conference.topics.0);
    context.insert("start_date", &conference.start_date.map(|d| d.to_string()));
    context.insert("end_date", &conference.end_date.map(|d| d.to_string()));
    context.insert("max_attendees", &conference.max_attendees);

    let html = state.templates.render(CONFIRMATION_TEMPLATE, &context)
        .map_err(|e| AppError::InternalWithMsg(format!("Tera render error: {:?}", e)))?;

    info!("Sending conference confirmation to {}", recipient);
    state.email_service.send(recipient, "You created a new Conference!", &html).await
}
