// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::blog_post_dto::{
    BlogPostDto, BlogPostListQuery, BlogPostListResponse,
};
use crate::domain::models::blog_post::PostStatus;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::blog_post_repository::{BlogPostQuery, BlogPostRepository};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use std::sync::Arc;
use validator::Validate;

/// 已发布文章列表，按发布时间倒序
pub async fn list_blog_posts(
    Extension(repo): Extension<Arc<dyn BlogPostRepository>>,
    Query(query): Query<BlogPostListQuery>,
) -> Result<Json<BlogPostListResponse>, AppError> {
    query.validate()?;

    let limit = query.limit.unwrap_or(10);
    let offset = query.offset.unwrap_or(0);
    let posts = repo
        .find_published(BlogPostQuery {
            category: query.category,
            published_after: None,
            limit,
            offset,
        })
        .await?;

    Ok(Json(BlogPostListResponse {
        posts: posts.into_iter().map(Into::into).collect(),
        limit,
        offset,
    }))
}

/// 按 slug 获取文章，未发布的文章视为不存在
pub async fn get_blog_post(
    Extension(repo): Extension<Arc<dyn BlogPostRepository>>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostDto>, AppError> {
    let post = repo
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.status == PostStatus::Published)
        .ok_or(RepositoryError::NotFound)?;

    Ok(Json(post.into()))
}
