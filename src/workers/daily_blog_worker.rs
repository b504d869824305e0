// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::JobType;
use crate::domain::repositories::research_repository::ResearchRepository;
use crate::domain::services::content_generator::ContentGenerator;
use crate::domain::services::publisher::BlogPublisher;
use crate::domain::services::research_gatherer::ResearchGatherer;
use crate::workers::worker::AutomationWorkflow;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 单次生成可参考的研究数据上限
const RESEARCH_QUERY_LIMIT: u64 = 100;

/// 每日博客工作流
///
/// 收集研究数据 → 生成文章 → 发布
pub struct DailyBlogWorkflow {
    gatherer: Arc<ResearchGatherer>,
    research: Arc<dyn ResearchRepository>,
    generator: Arc<ContentGenerator>,
    publisher: Arc<BlogPublisher>,
    research_window: Duration,
}

impl DailyBlogWorkflow {
    pub fn new(
        gatherer: Arc<ResearchGatherer>,
        research: Arc<dyn ResearchRepository>,
        generator: Arc<ContentGenerator>,
        publisher: Arc<BlogPublisher>,
    ) -> Self {
        Self {
            gatherer,
            research,
            generator,
            publisher,
            research_window: Duration::hours(24),
        }
    }
}

#[async_trait]
impl AutomationWorkflow for DailyBlogWorkflow {
    fn job_type(&self) -> JobType {
        JobType::DailyBlog
    }

    async fn execute(&self, job_id: Uuid) -> anyhow::Result<Value> {
        let now = Utc::now();

        let gathered = self
            .gatherer
            .gather(now)
            .await
            .context("research gathering failed")?;

        // Also picks up videos promoted by the YouTube monitor
        let research = self
            .research
            .find_since(now - self.research_window, RESEARCH_QUERY_LIMIT)
            .await
            .context("loading recent research failed")?;

        let post = self
            .generator
            .generate_blog_post(&research, now)
            .await
            .context("blog text generation failed")?;

        let published = self
            .publisher
            .publish(post, now)
            .await
            .context("publishing blog post failed")?;

        info!(
            "Daily blog job {} published '{}' from {} research items",
            job_id,
            published.slug,
            research.len()
        );

        Ok(json!({
            "post_id": published.id,
            "slug": published.slug,
            "title": published.title,
            "category": published.category,
            "featured_image": published.featured_image,
            "gathered_count": gathered.len(),
            "research_count": research.len(),
        }))
    }
}
