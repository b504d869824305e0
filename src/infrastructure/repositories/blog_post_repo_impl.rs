// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blog_post::{BlogPost, PostStatus};
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::blog_post_repository::{BlogPostQuery, BlogPostRepository};
use crate::infrastructure::database::entities::blog_post as post_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;

/// 博客文章仓库实现
#[derive(Clone)]
pub struct BlogPostRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl BlogPostRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<post_entity::Model> for BlogPost {
    fn from(model: post_entity::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            excerpt: model.excerpt,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            category: model.category,
            status: model.status.parse().unwrap_or_default(),
            published_at: model.published_at.map(|t| t.with_timezone(&Utc)),
            featured_image: model.featured_image,
            source_data: model.source_data,
            social_snippets: model.social_snippets,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<BlogPost> for post_entity::ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            tags: Set(serde_json::json!(post.tags)),
            category: Set(post.category),
            status: Set(post.status.to_string()),
            published_at: Set(post.published_at.map(Into::into)),
            featured_image: Set(post.featured_image),
            source_data: Set(post.source_data),
            social_snippets: Set(post.social_snippets),
            created_at: Set(post.created_at.into()),
        }
    }
}

#[async_trait]
impl BlogPostRepository for BlogPostRepositoryImpl {
    async fn create(&self, post: &BlogPost) -> Result<BlogPost, RepositoryError> {
        let model: post_entity::ActiveModel = post.clone().into();
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError> {
        let model = post_entity::Entity::find()
            .filter(post_entity::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_published(&self, query: BlogPostQuery) -> Result<Vec<BlogPost>, RepositoryError> {
        let mut select = post_entity::Entity::find()
            .filter(post_entity::Column::Status.eq(PostStatus::Published.to_string()));

        if let Some(category) = query.category {
            select = select.filter(post_entity::Column::Category.eq(category));
        }

        if let Some(after) = query.published_after {
            let after: DateTime<FixedOffset> = after.into();
            select = select.filter(post_entity::Column::PublishedAt.gte(after));
        }

        let models = select
            .order_by_desc(post_entity::Column::PublishedAt)
            .offset(query.offset)
            .limit(query.limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
