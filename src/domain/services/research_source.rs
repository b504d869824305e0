// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::research_item::RawTopic;
use crate::domain::models::youtube::VideoMetadata;
use crate::domain::services::relevance_scorer::{
    score_video_at, MARKETING_SEARCH_KEYWORDS, MAX_KEYWORD_SEARCHES, PROMOTE_AT,
};
use crate::domain::services::video_search_service::VideoSearchService;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// 摘要最大字符数
const SUMMARY_MAX_CHARS: usize = 500;

/// 研究数据的时间窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl ResearchWindow {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { since, until }
    }
}

/// 研究数据来源
///
/// 每个来源返回原始话题，由 `ResearchGatherer` 统一转换和持久化
#[async_trait]
pub trait ResearchSource: Send + Sync {
    /// 来源名称，用于日志
    fn name(&self) -> &str;

    async fn fetch(&self, window: ResearchWindow) -> anyhow::Result<Vec<RawTopic>>;
}

struct CuratedTopic {
    title: &'static str,
    summary: &'static str,
    keywords: &'static [&'static str],
    relevance_score: i32,
    url: &'static str,
    content_type: &'static str,
}

const CURATED_TOPICS: &[CuratedTopic] = &[
    CuratedTopic {
        title: "AI-Powered Marketing Automation Goes Mainstream",
        summary: "Small and mid-sized businesses are adopting AI assistants to draft campaigns, \
                  segment audiences and schedule follow-ups, cutting routine marketing work \
                  while keeping a human in the approval loop.",
        keywords: &["ai", "automation", "marketing"],
        relevance_score: 9,
        url: "https://www.thinkwithgoogle.com/marketing-strategies/automation/",
        content_type: "article",
    },
    CuratedTopic {
        title: "Search Is Changing: SEO in the Age of AI Overviews",
        summary: "AI-generated answer boxes are reducing clicks on informational queries. \
                  Brands that publish original data, clear expertise signals and structured \
                  content keep their visibility.",
        keywords: &["seo", "search", "ai"],
        relevance_score: 8,
        url: "https://developers.google.com/search/blog",
        content_type: "article",
    },
    CuratedTopic {
        title: "Short-Form Video Keeps Winning Social Reach",
        summary: "Short vertical video continues to outperform static posts on reach and \
                  engagement across Instagram, TikTok and YouTube Shorts, especially for \
                  local service businesses.",
        keywords: &["social media", "video", "content"],
        relevance_score: 7,
        url: "https://blog.hootsuite.com/social-media-trends/",
        content_type: "report",
    },
    CuratedTopic {
        title: "Email Remains the Highest-ROI Owned Channel",
        summary: "Segmented, behaviour-triggered email flows continue to deliver the best \
                  return of any owned channel, with welcome and re-engagement sequences \
                  leading conversion.",
        keywords: &["email", "newsletter", "conversion"],
        relevance_score: 7,
        url: "https://mailchimp.com/resources/email-marketing-benchmarks/",
        content_type: "report",
    },
    CuratedTopic {
        title: "First-Party Data Strategies After Third-Party Cookies",
        summary: "Marketers are investing in lead magnets, loyalty programs and CRM hygiene \
                  to build first-party audiences that survive browser privacy changes.",
        keywords: &["data", "privacy", "lead generation"],
        relevance_score: 6,
        url: "https://www.iab.com/guidelines/",
        content_type: "article",
    },
];

/// 固定的精选营销话题
#[derive(Debug, Default, Clone)]
pub struct CuratedResearchSource;

impl CuratedResearchSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResearchSource for CuratedResearchSource {
    fn name(&self) -> &str {
        "curated"
    }

    async fn fetch(&self, _window: ResearchWindow) -> anyhow::Result<Vec<RawTopic>> {
        Ok(CURATED_TOPICS
            .iter()
            .map(|topic| RawTopic {
                title: topic.title.to_string(),
                source: "curated".to_string(),
                summary: topic.summary.split_whitespace().collect::<Vec<_>>().join(" "),
                keywords: topic.keywords.iter().map(|k| k.to_string()).collect(),
                relevance_score: topic.relevance_score,
                url: topic.url.to_string(),
                content_type: topic.content_type.to_string(),
            })
            .collect())
    }
}

/// 将视频转换为研究话题
pub fn video_topic(video: &VideoMetadata, score: i32, keywords: Vec<String>) -> RawTopic {
    let summary: String = video.description.chars().take(SUMMARY_MAX_CHARS).collect();
    RawTopic {
        title: video.title.clone(),
        source: format!("youtube:{}", video.channel_title),
        summary: if summary.trim().is_empty() {
            video.title.clone()
        } else {
            summary
        },
        keywords,
        relevance_score: score,
        url: video.watch_url(),
        content_type: "video".to_string(),
    }
}

/// 基于关键词的视频扫描
///
/// 只保留评分达到提升门槛（>= 7）的视频，关键词数量受 `MAX_KEYWORD_SEARCHES` 限制
pub struct YoutubeKeywordSource {
    search: Arc<dyn VideoSearchService>,
    keywords: Vec<String>,
    max_results: u32,
}

impl YoutubeKeywordSource {
    pub fn new(search: Arc<dyn VideoSearchService>, max_results: u32) -> Self {
        Self::with_keywords(
            search,
            MARKETING_SEARCH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_results,
        )
    }

    pub fn with_keywords(
        search: Arc<dyn VideoSearchService>,
        mut keywords: Vec<String>,
        max_results: u32,
    ) -> Self {
        keywords.truncate(MAX_KEYWORD_SEARCHES);
        Self {
            search,
            keywords,
            max_results,
        }
    }
}

#[async_trait]
impl ResearchSource for YoutubeKeywordSource {
    fn name(&self) -> &str {
        "youtube_keywords"
    }

    async fn fetch(&self, window: ResearchWindow) -> anyhow::Result<Vec<RawTopic>> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();

        for keyword in &self.keywords {
            let videos = match self
                .search
                .search_videos(keyword, window.since, self.max_results)
                .await
            {
                Ok(videos) => videos,
                Err(e) => {
                    warn!("Keyword search '{}' failed: {}", keyword, e);
                    continue;
                }
            };

            for video in videos {
                if !seen.insert(video.video_id.clone()) {
                    continue;
                }
                let score = score_video_at(
                    &video.title,
                    &video.description,
                    video.published_at,
                    window.until,
                );
                if score >= PROMOTE_AT {
                    topics.push(video_topic(&video, score, vec![keyword.clone()]));
                }
            }
        }

        debug!(
            "Keyword scan produced {} topics from {} searches",
            topics.len(),
            self.keywords.len()
        );
        Ok(topics)
    }
}
