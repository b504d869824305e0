// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::youtube::{YoutubeChannel, YoutubeVideo};
use crate::domain::repositories::automation_job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// YouTube 频道与视频仓库特质
#[async_trait]
pub trait YoutubeRepository: Send + Sync {
    /// 按频道ID插入或更新名称，返回存储的频道
    async fn upsert_channel(
        &self,
        channel_id: &str,
        name: &str,
    ) -> Result<YoutubeChannel, RepositoryError>;
    /// 记录频道检查时间
    async fn mark_channel_checked(
        &self,
        channel_id: &str,
        checked_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
    async fn find_video(&self, video_id: &str) -> Result<Option<YoutubeVideo>, RepositoryError>;
    /// 按视频ID插入或更新评分信息
    async fn upsert_video(&self, video: &YoutubeVideo) -> Result<YoutubeVideo, RepositoryError>;
}
