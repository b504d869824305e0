// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{published_post, setup_db, FakeEmail};
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::Duration;
use contentrs::domain::models::blog_post::PostStatus;
use contentrs::domain::repositories::automation_job_repository::AutomationJobRepository;
use contentrs::domain::repositories::blog_post_repository::BlogPostRepository;
use contentrs::domain::repositories::form_submission_repository::FormSubmissionRepository;
use contentrs::domain::services::email_dispatcher::EmailDispatcher;
use contentrs::domain::use_cases::submit_form::SubmitFormUseCase;
use contentrs::infrastructure::repositories::automation_job_repo_impl::AutomationJobRepositoryImpl;
use contentrs::infrastructure::repositories::blog_post_repo_impl::BlogPostRepositoryImpl;
use contentrs::infrastructure::repositories::form_submission_repo_impl::FormSubmissionRepositoryImpl;
use contentrs::presentation::handlers::automation_handler::SchedulerInfo;
use contentrs::presentation::middleware::admin_auth::AdminAuthState;
use contentrs::presentation::routes::{routes, RouterComponents};
use contentrs::scheduler::{AutomationScheduler, JobTracker};
use contentrs::workers::cleanup_worker::CleanupWorkflow;
use serde_json::{json, Value};
use std::sync::Arc;

const TOKEN: &str = "test-admin-token";

struct TestApp {
    server: TestServer,
    forms: Arc<dyn FormSubmissionRepository>,
    email: Arc<FakeEmail>,
}

async fn test_app(email: FakeEmail) -> TestApp {
    let db = setup_db().await;
    let jobs: Arc<dyn AutomationJobRepository> =
        Arc::new(AutomationJobRepositoryImpl::new(db.clone()));
    let posts: Arc<dyn BlogPostRepository> = Arc::new(BlogPostRepositoryImpl::new(db.clone()));
    let forms: Arc<dyn FormSubmissionRepository> =
        Arc::new(FormSubmissionRepositoryImpl::new(db));

    posts
        .create(&published_post("live-post", "Live Post", Duration::hours(1)))
        .await
        .unwrap();
    let mut draft = published_post("draft-post", "Draft Post", Duration::hours(1));
    draft.status = PostStatus::Draft;
    draft.published_at = None;
    posts.create(&draft).await.unwrap();

    let email = Arc::new(email);
    let dispatcher = Arc::new(
        EmailDispatcher::new(email.clone())
            .with_notification_recipients(vec!["team@agency.example".into()]),
    );
    let scheduler = AutomationScheduler::new(Arc::new(JobTracker::new(jobs.clone())))
        .register(Arc::new(CleanupWorkflow::new(jobs.clone(), 90)));

    let app = routes(RouterComponents {
        scheduler: Arc::new(scheduler),
        scheduler_info: SchedulerInfo {
            enabled: false,
            timezone: "America/New_York".into(),
        },
        jobs,
        posts,
        submit_form: Arc::new(SubmitFormUseCase::new(forms.clone(), dispatcher)),
        admin: AdminAuthState::new(TOKEN),
    });

    TestApp {
        server: TestServer::new(app).unwrap(),
        forms,
        email,
    }
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

#[tokio::test]
async fn test_health_and_version() {
    let app = test_app(FakeEmail::new()).await;

    let health = app.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.text(), "OK");

    let version = app.server.get("/version").await;
    assert_eq!(version.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = test_app(FakeEmail::new()).await;

    let missing = app.server.get("/api/automation/status").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let wrong = app
        .server
        .post("/api/automation/trigger/cleanup")
        .add_header(header::AUTHORIZATION, bearer("nope"))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trigger_status_and_job_listing() {
    let app = test_app(FakeEmail::new()).await;

    let trigger = app
        .server
        .post("/api/automation/trigger/cleanup")
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await;
    trigger.assert_status_ok();
    let body: Value = trigger.json();
    assert_eq!(body["job"]["job_type"], "cleanup");
    assert_eq!(body["job"]["status"], "completed");
    assert_eq!(body["job"]["result_data"]["would_delete"], 0);

    let status: Value = app
        .server
        .get("/api/automation/status")
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await
        .json();
    assert_eq!(status["scheduler_enabled"], false);
    assert_eq!(status["timezone"], "America/New_York");
    assert_eq!(status["jobs"]["cleanup"]["registered"], true);
    assert_eq!(status["jobs"]["cleanup"]["running"], false);
    assert_eq!(status["jobs"]["cleanup"]["last_run"]["status"], "completed");
    assert_eq!(status["jobs"]["daily_blog"]["registered"], false);
    assert_eq!(status["counts"]["completed"], 1);

    let jobs: Value = app
        .server
        .get("/api/automation/jobs")
        .add_query_param("job_type", "cleanup")
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await
        .json();
    assert_eq!(jobs["count"], 1);
}

#[tokio::test]
async fn test_trigger_errors_map_to_status_codes() {
    let app = test_app(FakeEmail::new()).await;

    let unknown = app
        .server
        .post("/api/automation/trigger/launch-rockets")
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);

    let unregistered = app
        .server
        .post("/api/automation/trigger/daily-blog")
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await;
    assert_eq!(unregistered.status_code(), StatusCode::NOT_FOUND);

    let bad_limit = app
        .server
        .get("/api/automation/jobs")
        .add_query_param("limit", 0)
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await;
    assert_eq!(bad_limit.status_code(), StatusCode::BAD_REQUEST);

    let bad_type = app
        .server
        .get("/api/automation/jobs")
        .add_query_param("job_type", "bogus")
        .add_header(header::AUTHORIZATION, bearer(TOKEN))
        .await;
    assert_eq!(bad_type.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_blog_endpoints() {
    let app = test_app(FakeEmail::new()).await;

    let list: Value = app.server.get("/api/blog-posts").await.json();
    assert_eq!(list["posts"].as_array().unwrap().len(), 1);
    assert_eq!(list["posts"][0]["slug"], "live-post");
    assert!(list["posts"][0].get("content").is_none());
    assert_eq!(list["limit"], 10);

    let post = app.server.get("/api/blog-posts/live-post").await;
    post.assert_status_ok();
    assert_eq!(post.json::<Value>()["title"], "Live Post");

    let draft = app.server.get("/api/blog-posts/draft-post").await;
    assert_eq!(draft.status_code(), StatusCode::NOT_FOUND);

    let missing = app.server.get("/api/blog-posts/nothing-here").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let too_many = app
        .server
        .get("/api/blog-posts")
        .add_query_param("limit", 500)
        .await;
    assert_eq!(too_many.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_form_submission_succeeds_when_email_provider_fails() {
    let app = test_app(FakeEmail::failing()).await;

    let response = app
        .server
        .post("/api/form-submissions")
        .json(&json!({
            "form_type": "newsletter",
            "name": "Grace",
            "email": "Grace@Example.com",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["status"], "received");

    let recipients = app.forms.find_newsletter_recipients().await.unwrap();
    assert_eq!(recipients, vec!["grace@example.com".to_string()]);

    // the notification runs in the background and its failure is swallowed
    for _ in 0..50 {
        if !app.email.sent_to().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(app.email.sent_to(), vec!["team@agency.example".to_string()]);
}

#[tokio::test]
async fn test_invalid_form_submission_is_rejected() {
    let app = test_app(FakeEmail::new()).await;

    let response = app
        .server
        .post("/api/form-submissions")
        .json(&json!({
            "form_type": "contact",
            "name": "Grace",
            "email": "not-an-email",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.forms.find_newsletter_recipients().await.unwrap().is_empty());
}
