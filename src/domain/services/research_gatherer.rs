// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::research_item::ContentResearchItem;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::research_repository::ResearchRepository;
use crate::domain::services::research_source::{ResearchSource, ResearchWindow};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// 研究数据收集器
///
/// 依次调用所有来源，失败的来源被跳过，成功的话题按URL写入研究表
pub struct ResearchGatherer {
    sources: Vec<Arc<dyn ResearchSource>>,
    repo: Arc<dyn ResearchRepository>,
    lookback: Duration,
}

impl ResearchGatherer {
    pub fn new(repo: Arc<dyn ResearchRepository>) -> Self {
        Self {
            sources: Vec::new(),
            repo,
            lookback: Duration::hours(48),
        }
    }

    pub fn with_source(mut self, source: Arc<dyn ResearchSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.lookback = lookback;
        self
    }

    /// 收集研究数据
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<ContentResearchItem>)` - 实际存储的条目（评分已限制在 [0, 10]）
    /// * `Err(RepositoryError)` - 持久化失败
    pub async fn gather(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentResearchItem>, RepositoryError> {
        let window = ResearchWindow::new(now - self.lookback, now);
        let mut stored = Vec::new();

        for source in &self.sources {
            let topics = match source.fetch(window).await {
                Ok(topics) => topics,
                Err(e) => {
                    warn!("Research source '{}' failed, skipping: {:#}", source.name(), e);
                    continue;
                }
            };

            info!(
                "Research source '{}' returned {} topics",
                source.name(),
                topics.len()
            );

            for topic in topics {
                let item = ContentResearchItem::from_topic(topic, now);
                stored.push(self.repo.upsert_by_url(&item).await?);
            }
        }

        Ok(stored)
    }
}
