// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{published_post, setup_db, subscriber, FakeEmail, FakeImage, FakeLlm};
use chrono::Duration;
use contentrs::domain::models::automation_job::{JobStatus, JobType};
use contentrs::domain::repositories::blog_post_repository::BlogPostRepository;
use contentrs::domain::repositories::form_submission_repository::FormSubmissionRepository;
use contentrs::domain::services::content_generator::ContentGenerator;
use contentrs::domain::services::email_dispatcher::EmailDispatcher;
use contentrs::infrastructure::repositories::automation_job_repo_impl::AutomationJobRepositoryImpl;
use contentrs::infrastructure::repositories::blog_post_repo_impl::BlogPostRepositoryImpl;
use contentrs::infrastructure::repositories::form_submission_repo_impl::FormSubmissionRepositoryImpl;
use contentrs::infrastructure::repositories::newsletter_repo_impl::NewsletterRepositoryImpl;
use contentrs::scheduler::{AutomationScheduler, JobTracker};
use contentrs::workers::newsletter_worker::MonthlyNewsletterWorkflow;
use std::sync::Arc;

async fn run_newsletter(llm: FakeLlm, email: Arc<FakeEmail>, subscribers: &[&str]) -> serde_json::Value {
    let db = setup_db().await;
    let posts = Arc::new(BlogPostRepositoryImpl::new(db.clone()));
    let forms = Arc::new(FormSubmissionRepositoryImpl::new(db.clone()));

    posts
        .create(&published_post("recent-post", "Recent Post", Duration::days(3)))
        .await
        .unwrap();
    posts
        .create(&published_post("old-post", "Old Post", Duration::days(45)))
        .await
        .unwrap();
    for address in subscribers {
        forms.create(&subscriber(address)).await.unwrap();
    }

    let generator = Arc::new(
        ContentGenerator::new(Arc::new(llm), Arc::new(FakeImage::failing()))
            .with_public_url("https://agency.example.com"),
    );
    let dispatcher = Arc::new(
        EmailDispatcher::new(email).with_batching(2, std::time::Duration::ZERO),
    );
    let workflow = MonthlyNewsletterWorkflow::new(
        posts,
        forms,
        Arc::new(NewsletterRepositoryImpl::new(db.clone())),
        generator,
        dispatcher,
    );
    let scheduler = AutomationScheduler::new(Arc::new(JobTracker::new(Arc::new(
        AutomationJobRepositoryImpl::new(db),
    ))))
    .register(Arc::new(workflow));

    let job = scheduler.trigger(JobType::MonthlyNewsletter).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed, "{:?}", job.error_message);
    job.result_data
}

#[tokio::test]
async fn test_non_json_reply_sends_fallback_newsletter() {
    let email = Arc::new(FakeEmail::new());
    let result = run_newsletter(
        FakeLlm::replying("Here is a great newsletter for you!"),
        email.clone(),
        &["a@example.com", "b@example.com", "c@example.com"],
    )
    .await;

    assert_eq!(result["is_fallback"], true);
    assert!(!result["subject"].as_str().unwrap().is_empty());
    assert_eq!(result["post_count"], 1);
    assert_eq!(result["recipient_count"], 3);
    assert_eq!(result["success_count"], 3);
    assert_eq!(result["batches"], 2);
    assert_eq!(result["status"], "sent");

    let sent = email.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].html.contains("https://agency.example.com/blog/recent-post"));
    assert!(!sent[0].html.contains("old-post"));
}

#[tokio::test]
async fn test_generated_newsletter_counts_partial_failures() {
    let email = Arc::new(FakeEmail::failing_for(&["b@example.com"]));
    let reply = "```json\n{\"subject\": \"March growth notes\", \"content\": \"Three ideas for this month.\"}\n```";
    let result = run_newsletter(
        FakeLlm::replying(reply),
        email.clone(),
        &["a@example.com", "b@example.com", "c@example.com"],
    )
    .await;

    assert_eq!(result["is_fallback"], false);
    assert_eq!(result["subject"], "March growth notes");
    assert_eq!(result["success_count"], 2);
    assert_eq!(result["failure_count"], 1);
    assert_eq!(result["status"], "sent");
    assert_eq!(email.sent_to().len(), 3);
}

#[tokio::test]
async fn test_total_delivery_failure_marks_campaign_failed() {
    let result = run_newsletter(
        FakeLlm::failing("timeout"),
        Arc::new(FakeEmail::failing()),
        &["a@example.com"],
    )
    .await;

    assert_eq!(result["is_fallback"], true);
    assert_eq!(result["success_count"], 0);
    assert_eq!(result["failure_count"], 1);
    assert_eq!(result["status"], "failed");
}

#[tokio::test]
async fn test_no_subscribers_sends_nothing() {
    let email = Arc::new(FakeEmail::new());
    let result = run_newsletter(FakeLlm::replying("not json"), email.clone(), &[]).await;

    assert_eq!(result["recipient_count"], 0);
    assert_eq!(result["batches"], 0);
    assert_eq!(result["status"], "sent");
    assert!(email.sent_to().is_empty());
}
