// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::research_item::ContentResearchItem;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::research_repository::ResearchRepository;
use crate::infrastructure::database::entities::content_research as research_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;

/// 研究数据仓库实现
#[derive(Clone)]
pub struct ResearchRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ResearchRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<research_entity::Model> for ContentResearchItem {
    fn from(model: research_entity::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            source: model.source,
            summary: model.summary,
            keywords: serde_json::from_value(model.keywords).unwrap_or_default(),
            relevance_score: model.relevance_score,
            url: model.url,
            content_type: model.content_type,
            researched_at: model.researched_at.with_timezone(&Utc),
        }
    }
}

impl From<ContentResearchItem> for research_entity::ActiveModel {
    fn from(item: ContentResearchItem) -> Self {
        Self {
            id: Set(item.id),
            title: Set(item.title),
            source: Set(item.source),
            summary: Set(item.summary),
            keywords: Set(serde_json::json!(item.keywords)),
            relevance_score: Set(item.relevance_score),
            url: Set(item.url),
            content_type: Set(item.content_type),
            researched_at: Set(item.researched_at.into()),
        }
    }
}

#[async_trait]
impl ResearchRepository for ResearchRepositoryImpl {
    async fn upsert_by_url(
        &self,
        item: &ContentResearchItem,
    ) -> Result<ContentResearchItem, RepositoryError> {
        let existing = research_entity::Entity::find()
            .filter(research_entity::Column::Url.eq(item.url.as_str()))
            .one(self.db.as_ref())
            .await?;

        let stored = match existing {
            Some(existing) => {
                let mut model: research_entity::ActiveModel = item.clone().into();
                model.id = Set(existing.id);
                model.update(self.db.as_ref()).await?
            }
            None => {
                let model: research_entity::ActiveModel = item.clone().into();
                model.insert(self.db.as_ref()).await?
            }
        };

        Ok(stored.into())
    }

    async fn find_since(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<ContentResearchItem>, RepositoryError> {
        let since: DateTime<FixedOffset> = since.into();
        let models = research_entity::Entity::find()
            .filter(research_entity::Column::ResearchedAt.gte(since))
            .order_by_desc(research_entity::Column::RelevanceScore)
            .order_by_desc(research_entity::Column::ResearchedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
