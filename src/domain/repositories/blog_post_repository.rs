// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blog_post::BlogPost;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 文章查询参数
#[derive(Debug, Clone, Default)]
pub struct BlogPostQuery {
    pub category: Option<String>,
    pub published_after: Option<DateTime<Utc>>,
    pub limit: u64,
    pub offset: u64,
}

/// 博客文章仓库特质
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// 插入文章，slug 冲突时由数据库唯一索引拒绝
    async fn create(&self, post: &BlogPost) -> Result<BlogPost, RepositoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError>;
    /// 查询已发布文章，按发布时间倒序
    async fn find_published(&self, query: BlogPostQuery) -> Result<Vec<BlogPost>, RepositoryError>;
}
