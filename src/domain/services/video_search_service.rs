// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::youtube::VideoMetadata;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VideoSearchError {
    #[error("Video search not configured: {0}")]
    NotConfigured(String),

    #[error("Video search request failed: {0}")]
    Request(String),

    #[error("Video search provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Invalid video search response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for VideoSearchError {
    fn from(err: reqwest::Error) -> Self {
        VideoSearchError::Request(err.to_string())
    }
}

/// 视频搜索/列表服务特质
#[async_trait]
pub trait VideoSearchService: Send + Sync {
    /// 列出频道在某时间之后发布的视频
    async fn list_channel_videos(
        &self,
        channel_id: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoSearchError>;

    /// 按关键词搜索某时间之后发布的视频
    async fn search_videos(
        &self,
        query: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoSearchError>;
}
