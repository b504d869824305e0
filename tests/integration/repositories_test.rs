// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{published_post, setup_db, subscriber};
use chrono::{Duration, Utc};
use contentrs::domain::models::automation_job::{AutomationJob, JobStatus, JobType};
use contentrs::domain::models::blog_post::PostStatus;
use contentrs::domain::models::research_item::{ContentResearchItem, RawTopic};
use contentrs::domain::repositories::automation_job_repository::{
    AutomationJobRepository, JobQueryParams, RepositoryError,
};
use contentrs::domain::repositories::blog_post_repository::{BlogPostQuery, BlogPostRepository};
use contentrs::domain::repositories::form_submission_repository::FormSubmissionRepository;
use contentrs::domain::repositories::research_repository::ResearchRepository;
use contentrs::domain::repositories::youtube_repository::YoutubeRepository;
use contentrs::infrastructure::repositories::automation_job_repo_impl::AutomationJobRepositoryImpl;
use contentrs::infrastructure::repositories::blog_post_repo_impl::BlogPostRepositoryImpl;
use contentrs::infrastructure::repositories::form_submission_repo_impl::FormSubmissionRepositoryImpl;
use contentrs::infrastructure::repositories::research_repo_impl::ResearchRepositoryImpl;
use contentrs::infrastructure::repositories::youtube_repo_impl::YoutubeRepositoryImpl;
use serde_json::json;

fn topic(url: &str, score: i32, summary: &str) -> RawTopic {
    RawTopic {
        title: "Search is changing".into(),
        source: "curated".into(),
        summary: summary.into(),
        keywords: vec!["seo".into(), "search".into()],
        relevance_score: score,
        url: url.into(),
        content_type: "article".into(),
    }
}

#[tokio::test]
async fn test_research_upsert_by_url_refreshes_existing_item() {
    let repo = ResearchRepositoryImpl::new(setup_db().await);
    let now = Utc::now();

    let first = repo
        .upsert_by_url(&ContentResearchItem::from_topic(
            topic("https://example.com/a", 7, "old summary"),
            now - Duration::hours(2),
        ))
        .await
        .unwrap();
    let second = repo
        .upsert_by_url(&ContentResearchItem::from_topic(
            topic("https://example.com/a", 42, "new summary"),
            now,
        ))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.relevance_score, 10);

    let items = repo.find_since(now - Duration::days(1), 10).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].summary, "new summary");
    assert_eq!(items[0].keywords, vec!["seo".to_string(), "search".to_string()]);
}

#[tokio::test]
async fn test_research_find_since_orders_by_score() {
    let repo = ResearchRepositoryImpl::new(setup_db().await);
    let now = Utc::now();

    for (url, score) in [("https://e.com/1", 6), ("https://e.com/2", 9), ("https://e.com/3", 8)] {
        repo.upsert_by_url(&ContentResearchItem::from_topic(topic(url, score, "s"), now))
            .await
            .unwrap();
    }
    repo.upsert_by_url(&ContentResearchItem::from_topic(
        topic("https://e.com/stale", 10, "s"),
        now - Duration::days(3),
    ))
    .await
    .unwrap();

    let items = repo.find_since(now - Duration::days(1), 10).await.unwrap();
    let scores: Vec<i32> = items.iter().map(|i| i.relevance_score).collect();
    assert_eq!(scores, vec![9, 8, 6]);
}

#[tokio::test]
async fn test_blog_post_slug_is_unique() {
    let repo = BlogPostRepositoryImpl::new(setup_db().await);

    repo.create(&published_post("same-slug", "First", Duration::hours(1)))
        .await
        .unwrap();
    let duplicate = repo
        .create(&published_post("same-slug", "Second", Duration::hours(1)))
        .await;

    assert!(matches!(duplicate, Err(RepositoryError::Database(_))));
}

#[tokio::test]
async fn test_find_published_filters_and_paginates() {
    let repo = BlogPostRepositoryImpl::new(setup_db().await);

    let mut draft = published_post("draft-post", "Draft", Duration::hours(1));
    draft.status = PostStatus::Draft;
    draft.published_at = None;
    repo.create(&draft).await.unwrap();

    let mut seo = published_post("seo-post", "SEO", Duration::hours(3));
    seo.category = "SEO".into();
    repo.create(&seo).await.unwrap();
    repo.create(&published_post("newest", "Newest", Duration::hours(2)))
        .await
        .unwrap();
    repo.create(&published_post("oldest", "Oldest", Duration::days(2)))
        .await
        .unwrap();

    let all = repo
        .find_published(BlogPostQuery {
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    let slugs: Vec<&str> = all.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["newest", "seo-post", "oldest"]);

    let page = repo
        .find_published(BlogPostQuery {
            limit: 1,
            offset: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page[0].slug, "seo-post");

    let seo_only = repo
        .find_published(BlogPostQuery {
            category: Some("SEO".into()),
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(seo_only.len(), 1);

    let recent = repo
        .find_published(BlogPostQuery {
            published_after: Some(Utc::now() - Duration::days(1)),
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);
}

#[tokio::test]
async fn test_newsletter_recipients_are_deduplicated() {
    let repo = FormSubmissionRepositoryImpl::new(setup_db().await);

    repo.create(&subscriber("first@example.com")).await.unwrap();
    repo.create(&subscriber("First@Example.com")).await.unwrap();
    repo.create(&subscriber("second@example.com")).await.unwrap();

    let mut contact = subscriber("contact@example.com");
    contact.newsletter_opt_in = false;
    repo.create(&contact).await.unwrap();

    let recipients = repo.find_newsletter_recipients().await.unwrap();
    assert_eq!(
        recipients,
        vec!["first@example.com".to_string(), "second@example.com".to_string()]
    );
}

#[tokio::test]
async fn test_job_repository_queries() {
    let repo = AutomationJobRepositoryImpl::new(setup_db().await);

    let missing = AutomationJob::new(JobType::Cleanup, Utc::now());
    assert!(matches!(
        repo.update(&missing).await,
        Err(RepositoryError::NotFound)
    ));

    let mut older = AutomationJob::new(JobType::DailyBlog, Utc::now());
    older.created_at = Utc::now() - Duration::hours(1);
    repo.create(&older).await.unwrap();

    let newer = AutomationJob::new(JobType::DailyBlog, Utc::now());
    repo.create(&newer).await.unwrap();
    let newer = repo.update(&newer.start().unwrap()).await.unwrap();
    let newer = repo
        .update(&newer.complete(json!({ "slug": "x" })).unwrap())
        .await
        .unwrap();

    let cleanup = AutomationJob::new(JobType::Cleanup, Utc::now());
    repo.create(&cleanup).await.unwrap();

    let latest = repo
        .find_latest_by_type(JobType::DailyBlog)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, newer.id);
    assert_eq!(latest.result_data["slug"], "x");

    assert_eq!(repo.count_by_status(JobStatus::Pending).await.unwrap(), 2);
    assert_eq!(repo.count_by_status(JobStatus::Completed).await.unwrap(), 1);

    let completed = repo
        .find_recent(JobQueryParams {
            statuses: Some(vec![JobStatus::Completed]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);

    let limited = repo
        .find_recent(JobQueryParams {
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_youtube_channel_upsert_and_check() {
    let repo = YoutubeRepositoryImpl::new(setup_db().await);

    let channel = repo.upsert_channel("UC-1", "Old Name").await.unwrap();
    let renamed = repo.upsert_channel("UC-1", "New Name").await.unwrap();
    assert_eq!(renamed.id, channel.id);
    assert_eq!(renamed.name, "New Name");
    assert!(renamed.is_active);

    repo.mark_channel_checked("UC-1", Utc::now()).await.unwrap();
    let checked = repo.upsert_channel("UC-1", "New Name").await.unwrap();
    assert!(checked.last_checked_at.is_some());
}
