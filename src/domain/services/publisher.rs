// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blog_post::{BlogPost, PostStatus};
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::blog_post_repository::BlogPostRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PublishError {
    /// 同名 slug 已存在
    #[error("A blog post with slug '{0}' already exists")]
    SlugConflict(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 博客发布器
pub struct BlogPublisher {
    repo: Arc<dyn BlogPostRepository>,
}

impl BlogPublisher {
    pub fn new(repo: Arc<dyn BlogPostRepository>) -> Self {
        Self { repo }
    }

    /// 发布文章
    ///
    /// 将状态设为 `published` 并写入发布时间后插入一次；
    /// slug 已存在时返回 `SlugConflict`，不做任何写入
    pub async fn publish(
        &self,
        mut post: BlogPost,
        now: DateTime<Utc>,
    ) -> Result<BlogPost, PublishError> {
        if self.repo.find_by_slug(&post.slug).await?.is_some() {
            return Err(PublishError::SlugConflict(post.slug));
        }

        post.status = PostStatus::Published;
        post.published_at = Some(now);

        let stored = self.repo.create(&post).await?;
        info!("Published blog post {} ({})", stored.slug, stored.id);
        Ok(stored)
    }
}
