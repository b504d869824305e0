// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::research_item::ContentResearchItem;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 研究条目仓库特质
#[async_trait]
pub trait ResearchRepository: Send + Sync {
    /// 按URL插入或刷新研究条目
    ///
    /// 已存在相同URL时更新标题、摘要、关键词、评分和研究时间，
    /// 返回实际存储的条目（保留原有ID）
    async fn upsert_by_url(
        &self,
        item: &ContentResearchItem,
    ) -> Result<ContentResearchItem, RepositoryError>;
    /// 查询某时间之后的研究条目，按评分倒序
    async fn find_since(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<ContentResearchItem>, RepositoryError>;
}
