mod common;

use common::TestApp;
use conference_backend::domain::models::job::{Job, JobPayload, STATUS_PROCESSING};
use std::collections::HashSet;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_workers_claim_each_job_once() {
    let app = TestApp::new().await;

    let mut expected = HashSet::new();
    for _ in 0..30 {
        let job = app.state.job_repo.create(&Job::new(JobPayload::Announcement)).await.unwrap();
        expected.insert(job.id);
    }

    let mut set = JoinSet::new();
    for _ in 0..4 {
        let repo = app.state.job_repo.clone();
        set.spawn(async move {
            let mut claimed = Vec::new();
            loop {
                let batch = repo.find_pending(5).await.unwrap();
                if batch.is_empty() {
                    break;
                }
                claimed.extend(batch.into_iter().map(|j| j.id));
            }
            claimed
        });
    }

    let mut seen = HashSet::new();
    while let Some(result) = set.join_next().await {
        for id in result.unwrap() {
            assert!(seen.insert(id.clone()), "job {} claimed twice", id);
        }
    }
    assert_eq!(seen, expected);

    let claimed = app.state.job_repo.find_by_id(seen.iter().next().unwrap()).await.unwrap().unwrap();
    assert_eq!(claimed.status, STATUS_PROCESSING);
}

#[tokio::test]
async fn test_claimed_jobs_come_back_oldest_first() {
    let app = TestApp::new().await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let job = app.state.job_repo.create(&Job::new(JobPayload::FeaturedSpeaker {
            conference_id: "c".into(),
            session_id: format!("s{}", i),
        })).await.unwrap();
        ids.push(job.id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let batch = app.state.job_repo.find_pending(10).await.unwrap();
    let claimed: Vec<String> = batch.into_iter().map(|j| j.id).collect();
    assert_eq!(claimed, ids);
    assert!(app.state.job_repo.find_pending(10).await.unwrap().is_empty());
}
