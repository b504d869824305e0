// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::newsletter::NewsletterCampaign;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use async_trait::async_trait;

/// 新闻通讯活动仓库特质
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn create(
        &self,
        campaign: &NewsletterCampaign,
    ) -> Result<NewsletterCampaign, RepositoryError>;
    async fn update(
        &self,
        campaign: &NewsletterCampaign,
    ) -> Result<NewsletterCampaign, RepositoryError>;
}
