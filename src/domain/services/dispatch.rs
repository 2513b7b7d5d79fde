use crate::domain::{models::job::{Job, JobPayload}, ports::JobRepository};
use tracing::{debug, warn};

/// Queues a deferred task. Failing to queue is logged and swallowed: the
/// mutation that triggered the task has already been committed.
pub async fn enqueue(jobs: &dyn JobRepository, payload: JobPayload) {
    let job = Job::new(payload);
    match jobs.create(&job).await {
        Ok(created) => debug!("Queued {} job {}", created.job_type, created.id),
        Err(e) => warn!("Failed to queue {} job: {:?}", job.job_type, e),
    }
}
