// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blog_post::BlogPost;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 文章列表查询参数
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BlogPostListQuery {
    /// 默认 10
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
}

/// 文章
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    pub published_at: Option<DateTime<Utc>>,
    pub featured_image: String,
    pub social_snippets: serde_json::Value,
}

impl From<BlogPost> for BlogPostDto {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            tags: post.tags,
            category: post.category,
            published_at: post.published_at,
            featured_image: post.featured_image,
            social_snippets: post.social_snippets,
        }
    }
}

/// 文章列表中的摘要，不含正文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    pub published_at: Option<DateTime<Utc>>,
    pub featured_image: String,
}

impl From<BlogPost> for BlogPostSummaryDto {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            tags: post.tags,
            category: post.category,
            published_at: post.published_at,
            featured_image: post.featured_image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPostListResponse {
    pub posts: Vec<BlogPostSummaryDto>,
    pub limit: u64,
    pub offset: u64,
}
