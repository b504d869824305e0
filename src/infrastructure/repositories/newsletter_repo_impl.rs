// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::newsletter::NewsletterCampaign;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::newsletter_repository::NewsletterRepository;
use crate::infrastructure::database::entities::newsletter_campaign as campaign_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;

/// 新闻通讯活动仓库实现
#[derive(Clone)]
pub struct NewsletterRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl NewsletterRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<campaign_entity::Model> for NewsletterCampaign {
    fn from(model: campaign_entity::Model) -> Self {
        Self {
            id: model.id,
            subject: model.subject,
            content: model.content,
            html_content: model.html_content,
            recipient_count: model.recipient_count,
            success_count: model.success_count,
            failure_count: model.failure_count,
            status: model.status.parse().unwrap_or_default(),
            topics: serde_json::from_value(model.topics).unwrap_or_default(),
            is_fallback: model.is_fallback,
            created_at: model.created_at.with_timezone(&Utc),
            sent_at: model.sent_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

impl From<NewsletterCampaign> for campaign_entity::ActiveModel {
    fn from(campaign: NewsletterCampaign) -> Self {
        Self {
            id: Set(campaign.id),
            subject: Set(campaign.subject),
            content: Set(campaign.content),
            html_content: Set(campaign.html_content),
            recipient_count: Set(campaign.recipient_count),
            success_count: Set(campaign.success_count),
            failure_count: Set(campaign.failure_count),
            status: Set(campaign.status.to_string()),
            topics: Set(serde_json::json!(campaign.topics)),
            is_fallback: Set(campaign.is_fallback),
            created_at: Set(campaign.created_at.into()),
            sent_at: Set(campaign.sent_at.map(Into::into)),
        }
    }
}

#[async_trait]
impl NewsletterRepository for NewsletterRepositoryImpl {
    async fn create(
        &self,
        campaign: &NewsletterCampaign,
    ) -> Result<NewsletterCampaign, RepositoryError> {
        let model: campaign_entity::ActiveModel = campaign.clone().into();
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn update(
        &self,
        campaign: &NewsletterCampaign,
    ) -> Result<NewsletterCampaign, RepositoryError> {
        let model: campaign_entity::ActiveModel = campaign.clone().into();
        let updated = model.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }
}
