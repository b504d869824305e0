// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::YoutubeSettings;
use crate::domain::models::youtube::VideoMetadata;
use crate::domain::services::video_search_service::{VideoSearchError, VideoSearchService};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    published_at: DateTime<Utc>,
    channel_id: String,
    #[serde(default)]
    channel_title: String,
    title: String,
    #[serde(default)]
    description: String,
}

/// YouTube Data API v3 客户端
///
/// 使用 `search` 接口列出频道视频或按关键词搜索
pub struct YoutubeDataApi {
    client: reqwest::Client,
    api_base_url: String,
    api_key: Option<String>,
}

impl YoutubeDataApi {
    pub fn new(settings: &YoutubeSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    async fn search(
        &self,
        filter: (&str, &str),
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoSearchError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| VideoSearchError::NotConfigured("YouTube API key not configured".into()))?;

        let published_after = published_after.to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = max_results.to_string();
        let query = [
            ("part", "snippet"),
            filter,
            ("publishedAfter", published_after.as_str()),
            ("order", "date"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("key", api_key.as_str()),
        ];

        let response = self
            .client
            .get(format!("{}/search", self.api_base_url))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VideoSearchError::Provider { status, body });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| VideoSearchError::InvalidResponse(e.to_string()))?;

        let videos: Vec<VideoMetadata> = body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(VideoMetadata {
                    video_id,
                    channel_id: item.snippet.channel_id,
                    channel_title: item.snippet.channel_title,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    published_at: item.snippet.published_at,
                })
            })
            .collect();

        debug!("YouTube search {}={} returned {} videos", filter.0, filter.1, videos.len());
        Ok(videos)
    }
}

#[async_trait]
impl VideoSearchService for YoutubeDataApi {
    async fn list_channel_videos(
        &self,
        channel_id: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoSearchError> {
        self.search(("channelId", channel_id), published_after, max_results)
            .await
    }

    async fn search_videos(
        &self,
        query: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoSearchError> {
        self.search(("q", query), published_after, max_results).await
    }
}
