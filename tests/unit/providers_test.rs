// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use contentrs::config::settings::{EmailSettings, ImageSettings, LlmSettings, YoutubeSettings};
use contentrs::domain::services::email_service::{EmailError, EmailMessage, EmailService};
use contentrs::domain::services::image_service::{ImageRequest, ImageService, ImageServiceTrait};
use contentrs::domain::services::llm_service::{ChatRequest, GenerationError, LLMService};
use contentrs::domain::services::video_search_service::{VideoSearchError, VideoSearchService};
use contentrs::infrastructure::services::mailjet_email_service::MailjetEmailService;
use contentrs::infrastructure::services::youtube_data_api::YoutubeDataApi;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn llm_settings(base: &str, api_key: Option<&str>) -> LlmSettings {
    LlmSettings {
        api_key: api_key.map(str::to_string),
        model: "test-model".into(),
        api_base_url: base.into(),
        temperature: 0.7,
        max_tokens: 500,
        timeout_secs: 1,
    }
}

fn image_settings(base: &str, enabled: bool) -> ImageSettings {
    ImageSettings {
        enabled,
        api_key: Some("image-key".into()),
        model: "dall-e-3".into(),
        api_base_url: base.into(),
        size: "1792x1024".into(),
        quality: "standard".into(),
        timeout_secs: 5,
    }
}

fn email_settings(base: &str) -> EmailSettings {
    EmailSettings {
        api_base_url: base.into(),
        api_key: Some("mj-key".into()),
        api_secret: Some("mj-secret".into()),
        from_email: "hello@agency.example".into(),
        from_name: "Agency".into(),
        notification_recipients: vec![],
        batch_size: 50,
        batch_pause_ms: 0,
        timeout_secs: 5,
    }
}

fn youtube_settings(base: &str) -> YoutubeSettings {
    YoutubeSettings {
        api_key: Some("yt-key".into()),
        api_base_url: base.into(),
        channels: vec![],
        lookback_hours: 48,
        max_results: 10,
        timeout_secs: 5,
    }
}

fn message() -> EmailMessage {
    EmailMessage {
        to: "reader@example.com".into(),
        subject: "Hello".into(),
        html: "<p>Hi</p>".into(),
        text: "Hi".into(),
    }
}

#[tokio::test]
async fn test_llm_chat_completion_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer llm-key"))
        .and(body_partial_json(json!({ "model": "test-model" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Fresh analysis." } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = LLMService::new(&llm_settings(&server.uri(), Some("llm-key")));
    let (text, usage) = service
        .chat_completion(ChatRequest::new("system", "user"))
        .await
        .unwrap();

    assert_eq!(text, "Fresh analysis.");
    assert_eq!(usage.total_tokens, 15);
}

#[tokio::test]
async fn test_llm_provider_error_and_missing_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let service = LLMService::new(&llm_settings(&server.uri(), Some("llm-key")));
    let err = service
        .chat_completion(ChatRequest::new("system", "user"))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Provider { status: 429, .. }));

    let unconfigured = LLMService::new(&llm_settings(&server.uri(), None));
    let err = unconfigured
        .chat_completion(ChatRequest::new("system", "user"))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::NotConfigured(_)));
}

#[tokio::test]
async fn test_llm_request_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(3))
                .set_body_json(json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let service = LLMService::new(&llm_settings(&server.uri(), Some("llm-key")));
    let err = service
        .chat_completion(ChatRequest::new("system", "user"))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Timeout));
}

#[tokio::test]
async fn test_image_generation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(header("authorization", "Bearer image-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": "https://cdn.example.com/img.png" }]
        })))
        .mount(&server)
        .await;

    let request = ImageRequest {
        prompt: "a chart".into(),
        size: "1792x1024".into(),
        quality: "standard".into(),
    };

    let service = ImageService::new(&image_settings(&server.uri(), true));
    let url = service.generate_image(request.clone()).await.unwrap();
    assert_eq!(url, "https://cdn.example.com/img.png");

    let disabled = ImageService::new(&image_settings(&server.uri(), false));
    assert!(matches!(
        disabled.generate_image(request).await,
        Err(GenerationError::NotConfigured(_))
    ));
}

#[tokio::test]
async fn test_mailjet_send_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.1/send"))
        .and(basic_auth("mj-key", "mj-secret"))
        .and(body_partial_json(json!({
            "Messages": [{ "To": [{ "Email": "reader@example.com" }], "Subject": "Hello" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Messages": [{
                "Status": "success",
                "To": [{ "Email": "reader@example.com", "MessageID": 576460752303423488u64 }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = MailjetEmailService::new(&email_settings(&server.uri()));
    let receipt = service.send(&message()).await.unwrap();
    assert_eq!(receipt.message_id.as_deref(), Some("576460752303423488"));
}

#[tokio::test]
async fn test_mailjet_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.1/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Messages": [{ "Status": "error", "Errors": [{ "ErrorMessage": "bad recipient" }] }]
        })))
        .mount(&server)
        .await;

    let service = MailjetEmailService::new(&email_settings(&server.uri()));
    assert!(matches!(
        service.send(&message()).await,
        Err(EmailError::Provider { .. })
    ));

    let mut settings = email_settings(&server.uri());
    settings.api_secret = None;
    let unconfigured = MailjetEmailService::new(&settings);
    assert!(matches!(
        unconfigured.send(&message()).await,
        Err(EmailError::NotConfigured(_))
    ));
}

#[tokio::test]
async fn test_youtube_channel_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UC-abc"))
        .and(query_param("key", "yt-key"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "vid-1" },
                    "snippet": {
                        "publishedAt": "2026-01-05T10:00:00Z",
                        "channelId": "UC-abc",
                        "channelTitle": "Growth Channel",
                        "title": "SEO in 2026",
                        "description": "What changed"
                    }
                },
                {
                    "id": { "kind": "youtube#playlist", "playlistId": "pl-1" },
                    "snippet": {
                        "publishedAt": "2026-01-05T10:00:00Z",
                        "channelId": "UC-abc",
                        "title": "A playlist"
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    let api = YoutubeDataApi::new(&youtube_settings(&server.uri()));
    let videos = api
        .list_channel_videos("UC-abc", Utc::now() - Duration::hours(48), 5)
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].video_id, "vid-1");
    assert_eq!(videos[0].channel_title, "Growth Channel");
    assert_eq!(videos[0].title, "SEO in 2026");
}

#[tokio::test]
async fn test_youtube_keyword_search_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "seo strategy"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quotaExceeded"))
        .mount(&server)
        .await;

    let api = YoutubeDataApi::new(&youtube_settings(&server.uri()));
    let err = api
        .search_videos("seo strategy", Utc::now(), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, VideoSearchError::Provider { status: 403, .. }));

    let mut settings = youtube_settings(&server.uri());
    settings.api_key = None;
    let unconfigured = YoutubeDataApi::new(&settings);
    assert!(matches!(
        unconfigured.search_videos("seo", Utc::now(), 10).await,
        Err(VideoSearchError::NotConfigured(_))
    ));
}
