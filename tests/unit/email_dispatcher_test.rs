// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::FakeEmail;
use contentrs::domain::models::form_submission::{FormSubmission, FormType};
use contentrs::domain::services::email_dispatcher::EmailDispatcher;
use std::sync::Arc;
use std::time::Duration;

fn recipients(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("reader{}@example.com", i)).collect()
}

#[tokio::test]
async fn test_newsletter_is_sent_in_batches() {
    let email = Arc::new(FakeEmail::new());
    let dispatcher = EmailDispatcher::new(email.clone()).with_batching(50, Duration::ZERO);

    let report = dispatcher
        .send_newsletter("Subject", "<p>html</p>", "text", &recipients(120))
        .await;

    assert_eq!(report.recipient_count, 120);
    assert_eq!(report.success_count, 120);
    assert_eq!(report.failure_count, 0);
    assert_eq!(report.batches, 3);
    assert_eq!(email.sent_to().len(), 120);
}

#[tokio::test]
async fn test_failures_are_counted_not_returned() {
    let email = Arc::new(FakeEmail::failing_for(&["reader1@example.com", "reader4@example.com"]));
    let dispatcher = EmailDispatcher::new(email.clone()).with_batching(2, Duration::ZERO);

    let report = dispatcher
        .send_newsletter("Subject", "<p>html</p>", "text", &recipients(5))
        .await;

    assert_eq!(report.success_count, 3);
    assert_eq!(report.failure_count, 2);
    assert_eq!(report.batches, 3);
    // later batches still run after a failing one
    assert!(email.sent_to().contains(&"reader4@example.com".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_pause_only_between_batches() {
    let email = Arc::new(FakeEmail::new());
    let dispatcher = EmailDispatcher::new(email).with_batching(1, Duration::from_secs(1));

    let started = tokio::time::Instant::now();
    let report = dispatcher
        .send_newsletter("Subject", "<p>html</p>", "text", &recipients(3))
        .await;

    assert_eq!(report.batches, 3);
    assert_eq!(started.elapsed(), Duration::from_secs(2));
}

#[tokio::test]
async fn test_form_notification_is_best_effort() {
    let submission = FormSubmission {
        id: uuid::Uuid::new_v4(),
        form_type: FormType::Consultation,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        company: Some("Analytical Engines".into()),
        phone: None,
        message: Some("Need help with SEO".into()),
        newsletter_opt_in: false,
        source: None,
        created_at: chrono::Utc::now(),
    };

    let silent = EmailDispatcher::new(Arc::new(FakeEmail::new()));
    let report = silent.send_form_notification(&submission).await;
    assert_eq!(report.recipient_count, 0);

    let email = Arc::new(FakeEmail::failing());
    let dispatcher = EmailDispatcher::new(email.clone())
        .with_notification_recipients(vec!["team@agency.example".into()]);
    let report = dispatcher.send_form_notification(&submission).await;
    assert_eq!(report.recipient_count, 1);
    assert_eq!(report.failure_count, 1);

    let sent = email.sent.lock().unwrap().clone();
    assert!(sent[0].text.contains("ada@example.com"));
}
