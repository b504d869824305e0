// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{setup_db, video, FakeVideoSearch};
use chrono::{Duration, Utc};
use contentrs::config::settings::ChannelSettings;
use contentrs::domain::repositories::research_repository::ResearchRepository;
use contentrs::domain::repositories::youtube_repository::YoutubeRepository;
use contentrs::infrastructure::repositories::research_repo_impl::ResearchRepositoryImpl;
use contentrs::infrastructure::repositories::youtube_repo_impl::YoutubeRepositoryImpl;
use contentrs::workers::worker::AutomationWorkflow;
use contentrs::workers::youtube_monitor_worker::YoutubeMonitorWorkflow;
use std::sync::Arc;
use uuid::Uuid;

struct Harness {
    workflow: YoutubeMonitorWorkflow,
    search: Arc<FakeVideoSearch>,
    youtube: Arc<dyn YoutubeRepository>,
    research: Arc<dyn ResearchRepository>,
}

async fn harness(search: FakeVideoSearch, keywords: Vec<String>) -> Harness {
    let db = setup_db().await;
    let search = Arc::new(search);
    let youtube: Arc<dyn YoutubeRepository> = Arc::new(YoutubeRepositoryImpl::new(db.clone()));
    let research: Arc<dyn ResearchRepository> = Arc::new(ResearchRepositoryImpl::new(db));

    let workflow = YoutubeMonitorWorkflow::new(
        search.clone(),
        youtube.clone(),
        research.clone(),
        vec![ChannelSettings {
            channel_id: "UC-test".into(),
            name: "Test Channel".into(),
        }],
    )
    .with_keywords(keywords);

    Harness {
        workflow,
        search,
        youtube,
        research,
    }
}

fn marketing_search() -> FakeVideoSearch {
    let hot = video(
        "vid-hot",
        "ChatGPT lead generation for marketing",
        "",
        Duration::hours(2),
    );
    let mut search = FakeVideoSearch::default();
    search.channels.insert(
        "UC-test".into(),
        vec![
            hot.clone(),
            video("vid-off", "Cooking pasta at home", "", Duration::hours(30)),
        ],
    );
    search.keywords.insert(
        "ai marketing".into(),
        vec![
            hot,
            video("vid-seo", "SEO tips for small business", "", Duration::hours(30)),
        ],
    );
    search
}

#[tokio::test]
async fn test_monitor_scores_saves_and_promotes() {
    let h = harness(marketing_search(), vec!["ai marketing".into()]).await;

    let result = h.workflow.execute(Uuid::new_v4()).await.unwrap();
    assert_eq!(result["channels_checked"], 1);
    assert_eq!(result["keyword_searches"], 1);
    assert_eq!(result["videos_found"], 3);
    assert_eq!(result["discarded"], 1);
    assert_eq!(result["videos_saved"], 2);
    assert_eq!(result["relevant"], 2);
    assert_eq!(result["promoted"], 1);

    let hot = h.youtube.find_video("vid-hot").await.unwrap().unwrap();
    assert_eq!(hot.relevance_score, 10);
    assert!(hot.is_relevant);
    assert!(hot.promoted_to_research);

    let seo = h.youtube.find_video("vid-seo").await.unwrap().unwrap();
    assert_eq!(seo.relevance_score, 5);
    assert!(!seo.promoted_to_research);

    assert!(h.youtube.find_video("vid-off").await.unwrap().is_none());

    let research = h
        .research
        .find_since(Utc::now() - Duration::hours(1), 10)
        .await
        .unwrap();
    assert_eq!(research.len(), 1);
    assert!(research[0].url.contains("vid-hot"));
    assert_eq!(research[0].content_type, "video");
}

#[tokio::test]
async fn test_video_is_promoted_only_once() {
    let h = harness(marketing_search(), vec!["ai marketing".into()]).await;

    h.workflow.execute(Uuid::new_v4()).await.unwrap();
    let first = h.youtube.find_video("vid-hot").await.unwrap().unwrap();

    let second_run = h.workflow.execute(Uuid::new_v4()).await.unwrap();
    assert_eq!(second_run["promoted"], 0);

    let again = h.youtube.find_video("vid-hot").await.unwrap().unwrap();
    assert_eq!(again.id, first.id);
    assert_eq!(again.discovered_at, first.discovered_at);

    let research = h
        .research
        .find_since(Utc::now() - Duration::hours(1), 10)
        .await
        .unwrap();
    assert_eq!(research.len(), 1);
}

#[tokio::test]
async fn test_keyword_searches_are_capped() {
    let keywords = (1..=8).map(|i| format!("keyword {}", i)).collect();
    let h = harness(FakeVideoSearch::default(), keywords).await;

    let result = h.workflow.execute(Uuid::new_v4()).await.unwrap();
    assert_eq!(result["keyword_searches"], 5);

    let queries = h.search.queries.lock().unwrap().clone();
    assert_eq!(queries.iter().filter(|q| q.starts_with("q:")).count(), 5);
}

#[tokio::test]
async fn test_all_requests_failing_fails_the_run() {
    let search = FakeVideoSearch {
        fail_all: true,
        ..Default::default()
    };
    let h = harness(search, vec!["ai marketing".into()]).await;

    let err = h.workflow.execute(Uuid::new_v4()).await.unwrap_err();
    assert!(format!("{:#}", err).contains("quotaExceeded"));
}
