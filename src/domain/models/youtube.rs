// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 被监控的 YouTube 频道
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeChannel {
    pub id: Uuid,
    /// YouTube 频道 ID
    pub channel_id: String,
    pub name: String,
    pub is_active: bool,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// 已发现并评分的视频
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    pub id: Uuid,
    /// YouTube 视频 ID
    pub video_id: String,
    pub channel_id: String,
    pub channel_title: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub relevance_score: i32,
    pub is_relevant: bool,
    pub promoted_to_research: bool,
    pub discovered_at: DateTime<Utc>,
}

/// 视频搜索接口返回的元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub channel_id: String,
    pub channel_title: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

impl VideoMetadata {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}
