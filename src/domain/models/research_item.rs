// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 相关度评分上限
pub const MAX_RELEVANCE_SCORE: i32 = 10;

/// 内容研究条目
///
/// 由研究收集器或 YouTube 监控产生，内容生成器只读使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResearchItem {
    pub id: Uuid,
    pub title: String,
    /// 来源名称，例如 "curated" 或 "youtube:<channel>"
    pub source: String,
    pub summary: String,
    pub keywords: Vec<String>,
    /// 相关度评分，取值范围 0..=10
    pub relevance_score: i32,
    pub url: String,
    /// 内容类型，例如 "article"、"video"
    pub content_type: String,
    pub researched_at: DateTime<Utc>,
}

/// 研究来源返回的原始话题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTopic {
    pub title: String,
    pub source: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub relevance_score: i32,
    pub url: String,
    pub content_type: String,
}

impl ContentResearchItem {
    /// 由原始话题创建研究条目，评分被限制在 [0, 10]
    pub fn from_topic(topic: RawTopic, researched_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: topic.title,
            source: topic.source,
            summary: topic.summary,
            keywords: topic.keywords,
            relevance_score: topic.relevance_score.clamp(0, MAX_RELEVANCE_SCORE),
            url: topic.url,
            content_type: topic.content_type,
            researched_at,
        }
    }
}
