// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 博客文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    /// 唯一 slug，由 UTC 日期前缀和标题派生
    pub slug: String,
    /// HTML 正文
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    /// 配图地址，图片生成失败时为空字符串
    pub featured_image: String,
    /// 生成所依据的研究数据
    pub source_data: serde_json::Value,
    /// 各社交平台的推广短文
    pub social_snippets: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// 博客文章状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Published => write!(f, "published"),
            PostStatus::Scheduled => write!(f, "scheduled"),
        }
    }
}

impl FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "scheduled" => Ok(PostStatus::Scheduled),
            _ => Err(()),
        }
    }
}
