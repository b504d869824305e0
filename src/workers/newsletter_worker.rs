// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::JobType;
use crate::domain::models::newsletter::NewsletterCampaign;
use crate::domain::repositories::blog_post_repository::{BlogPostQuery, BlogPostRepository};
use crate::domain::repositories::form_submission_repository::FormSubmissionRepository;
use crate::domain::repositories::newsletter_repository::NewsletterRepository;
use crate::domain::services::content_generator::ContentGenerator;
use crate::domain::services::email_dispatcher::EmailDispatcher;
use crate::workers::worker::AutomationWorkflow;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 新闻通讯收录的文章数量上限
const MAX_NEWSLETTER_POSTS: u64 = 10;

/// 月度新闻通讯工作流
pub struct MonthlyNewsletterWorkflow {
    posts: Arc<dyn BlogPostRepository>,
    subscribers: Arc<dyn FormSubmissionRepository>,
    campaigns: Arc<dyn NewsletterRepository>,
    generator: Arc<ContentGenerator>,
    dispatcher: Arc<EmailDispatcher>,
}

impl MonthlyNewsletterWorkflow {
    pub fn new(
        posts: Arc<dyn BlogPostRepository>,
        subscribers: Arc<dyn FormSubmissionRepository>,
        campaigns: Arc<dyn NewsletterRepository>,
        generator: Arc<ContentGenerator>,
        dispatcher: Arc<EmailDispatcher>,
    ) -> Self {
        Self {
            posts,
            subscribers,
            campaigns,
            generator,
            dispatcher,
        }
    }
}

#[async_trait]
impl AutomationWorkflow for MonthlyNewsletterWorkflow {
    fn job_type(&self) -> JobType {
        JobType::MonthlyNewsletter
    }

    async fn execute(&self, job_id: Uuid) -> anyhow::Result<Value> {
        let now = Utc::now();

        let posts = self
            .posts
            .find_published(BlogPostQuery {
                published_after: Some(now - Duration::days(30)),
                limit: MAX_NEWSLETTER_POSTS,
                ..Default::default()
            })
            .await
            .context("loading recent posts failed")?;

        let outcome = self.generator.generate_newsletter_content(&posts).await;
        let is_fallback = outcome.is_fallback();
        let draft = outcome.into_inner();
        let (html, text) = self.generator.render_newsletter(&draft, &posts);

        let recipients = self
            .subscribers
            .find_newsletter_recipients()
            .await
            .context("loading newsletter recipients failed")?;

        let topics = posts.iter().map(|p| p.title.clone()).collect();
        let campaign = NewsletterCampaign::sending(
            &draft,
            html.clone(),
            topics,
            recipients.len(),
            is_fallback,
        );
        let mut campaign = self
            .campaigns
            .create(&campaign)
            .await
            .context("creating newsletter campaign failed")?;

        let report = self
            .dispatcher
            .send_newsletter(&draft.subject, &html, &text, &recipients)
            .await;

        campaign.record_delivery(report.success_count, report.failure_count);
        let campaign = self
            .campaigns
            .update(&campaign)
            .await
            .context("updating newsletter campaign failed")?;

        info!(
            "Newsletter job {} finished campaign {} ({})",
            job_id, campaign.id, campaign.status
        );

        Ok(json!({
            "campaign_id": campaign.id,
            "subject": campaign.subject,
            "status": campaign.status.to_string(),
            "is_fallback": is_fallback,
            "post_count": posts.len(),
            "recipient_count": report.recipient_count,
            "success_count": report.success_count,
            "failure_count": report.failure_count,
            "batches": report.batches,
        }))
    }
}
