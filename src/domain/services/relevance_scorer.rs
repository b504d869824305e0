// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// 高价值关键词，每命中一个 +3
pub const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "ai marketing",
    "marketing automation",
    "chatgpt",
    "lead generation",
    "conversion rate",
    "generative ai",
];

/// 中等价值关键词，每命中一个 +2
pub const MEDIUM_VALUE_KEYWORDS: &[&str] = &[
    "seo",
    "email marketing",
    "social media",
    "content marketing",
    "google ads",
    "small business",
];

/// 通用关键词，每命中一个 +1
pub const GENERAL_KEYWORDS: &[&str] = &[
    "marketing",
    "business",
    "growth",
    "strategy",
    "brand",
    "digital",
];

/// 关键词扫描使用的搜索词，按优先级排列
pub const MARKETING_SEARCH_KEYWORDS: &[&str] = &[
    "ai marketing",
    "marketing automation",
    "seo strategy",
    "social media marketing",
    "email marketing",
    "content marketing",
    "lead generation",
    "small business marketing",
];

/// 每次运行最多执行的关键词搜索次数
pub const MAX_KEYWORD_SEARCHES: usize = 5;

pub const MAX_VIDEO_SCORE: i32 = 10;
/// 低于该分数的视频直接丢弃
pub const DISCARD_BELOW: i32 = 3;
/// 达到该分数标记为相关
pub const RELEVANT_AT: i32 = 5;
/// 达到该分数提升为研究条目
pub const PROMOTE_AT: i32 = 7;

struct WeightedTerm {
    pattern: Regex,
    weight: i32,
}

static WEIGHTED_TERMS: Lazy<Vec<WeightedTerm>> = Lazy::new(|| {
    let tiers: [(&[&str], i32); 3] = [
        (HIGH_VALUE_KEYWORDS, 3),
        (MEDIUM_VALUE_KEYWORDS, 2),
        (GENERAL_KEYWORDS, 1),
    ];

    tiers
        .iter()
        .flat_map(|(terms, weight)| {
            terms.iter().filter_map(move |term| {
                Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                    .ok()
                    .map(|pattern| WeightedTerm {
                        pattern,
                        weight: *weight,
                    })
            })
        })
        .collect()
});

/// 视频评分后的处理结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoVerdict {
    /// 分数 < 3，不保存
    Discard,
    /// 保存但不相关
    Tracked,
    /// 分数 >= 5
    Relevant,
    /// 分数 >= 7，提升为研究条目
    Promote,
}

impl VideoVerdict {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= PROMOTE_AT => VideoVerdict::Promote,
            s if s >= RELEVANT_AT => VideoVerdict::Relevant,
            s if s >= DISCARD_BELOW => VideoVerdict::Tracked,
            _ => VideoVerdict::Discard,
        }
    }

    pub fn is_relevant(&self) -> bool {
        matches!(self, VideoVerdict::Relevant | VideoVerdict::Promote)
    }
}

/// 计算视频相关度评分
///
/// 纯函数：结果只取决于标题、描述、发布时间和给定的当前时间。
/// 关键词按整词匹配（不区分大小写），每个关键词最多计一次；
/// 发布不足 24 小时 +2，不足 6 小时再 +1；最终限制在 [0, 10]。
pub fn score_video_at(
    title: &str,
    description: &str,
    published_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> i32 {
    let text = format!("{} {}", title, description).to_lowercase();

    let mut score: i32 = WEIGHTED_TERMS
        .iter()
        .filter(|term| term.pattern.is_match(&text))
        .map(|term| term.weight)
        .sum();

    // Future timestamps count as brand new
    let age = (now - published_at).max(Duration::zero());
    if age < Duration::hours(24) {
        score += 2;
    }
    if age < Duration::hours(6) {
        score += 1;
    }

    score.clamp(0, MAX_VIDEO_SCORE)
}

/// 以当前时间计算视频评分
pub fn score_video(title: &str, description: &str, published_at: DateTime<Utc>) -> i32 {
    score_video_at(title, description, published_at, Utc::now())
}
