// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup_db;
use contentrs::domain::models::automation_job::{JobStatus, JobType};
use contentrs::domain::repositories::automation_job_repository::{
    AutomationJobRepository, JobQueryParams,
};
use contentrs::infrastructure::repositories::automation_job_repo_impl::AutomationJobRepositoryImpl;
use contentrs::scheduler::{JobTracker, SchedulerError};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::oneshot;

async fn tracker() -> (Arc<JobTracker>, Arc<dyn AutomationJobRepository>) {
    let db = setup_db().await;
    let repo: Arc<dyn AutomationJobRepository> = Arc::new(AutomationJobRepositoryImpl::new(db));
    (Arc::new(JobTracker::new(repo.clone())), repo)
}

#[tokio::test]
async fn test_successful_run_is_recorded_as_completed() {
    let (tracker, repo) = tracker().await;

    let job = tracker
        .run_with_job_tracking(JobType::Cleanup, |job_id| async move {
            Ok(json!({ "seen_id": job_id }))
        })
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.started_at.is_some());
    assert!(job.completed_at.is_some());
    assert!(job.error_message.is_none());
    // the closure received the id of the record it runs under
    assert_eq!(job.result_data["seen_id"], json!(job.id));

    let stored = repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.result_data, job.result_data);

    let all = repo.find_recent(JobQueryParams::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_failed_run_records_error_message() {
    let (tracker, repo) = tracker().await;

    let job = tracker
        .run_with_job_tracking(JobType::DailyBlog, |_| async move {
            Err(anyhow::anyhow!("llm unavailable"))
        })
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.completed_at.is_some());
    assert!(job.error_message.as_deref().unwrap().contains("llm unavailable"));

    let stored = repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Failed);
}

#[tokio::test]
async fn test_job_is_running_while_closure_executes() {
    let (tracker, repo) = tracker().await;
    let (started_tx, started_rx) = oneshot::channel::<uuid::Uuid>();
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let background = {
        let tracker = tracker.clone();
        tokio::spawn(async move {
            tracker
                .run_with_job_tracking(JobType::MonthlyNewsletter, |job_id| async move {
                    started_tx.send(job_id).unwrap();
                    release_rx.await.unwrap();
                    Ok(json!({}))
                })
                .await
        })
    };

    let job_id = started_rx.await.unwrap();
    assert!(tracker.is_running(JobType::MonthlyNewsletter));
    let running = repo.find_by_id(job_id).await.unwrap().unwrap();
    assert_eq!(running.status, JobStatus::Running);

    release_tx.send(()).unwrap();
    let finished = background.await.unwrap().unwrap();
    assert_eq!(finished.id, job_id);
    assert_eq!(finished.status, JobStatus::Completed);
    assert!(!tracker.is_running(JobType::MonthlyNewsletter));
}

#[tokio::test]
async fn test_same_type_trigger_is_rejected_without_creating_a_row() {
    let (tracker, repo) = tracker().await;
    let (started_tx, started_rx) = oneshot::channel::<()>();
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let background = {
        let tracker = tracker.clone();
        tokio::spawn(async move {
            tracker
                .run_with_job_tracking(JobType::DailyBlog, |_| async move {
                    started_tx.send(()).unwrap();
                    release_rx.await.unwrap();
                    Ok(json!({}))
                })
                .await
        })
    };
    started_rx.await.unwrap();

    let second = tracker
        .run_with_job_tracking(JobType::DailyBlog, |_| async move { Ok(json!({})) })
        .await;
    assert!(matches!(
        second,
        Err(SchedulerError::AlreadyRunning(JobType::DailyBlog))
    ));

    // a different type is not blocked
    let other = tracker
        .run_with_job_tracking(JobType::Cleanup, |_| async move { Ok(json!({})) })
        .await
        .unwrap();
    assert_eq!(other.status, JobStatus::Completed);

    release_tx.send(()).unwrap();
    background.await.unwrap().unwrap();

    let daily = repo
        .find_recent(JobQueryParams {
            job_type: Some(JobType::DailyBlog),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(daily.len(), 1);
}
