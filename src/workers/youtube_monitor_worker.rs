// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ChannelSettings;
use crate::domain::models::automation_job::JobType;
use crate::domain::models::research_item::ContentResearchItem;
use crate::domain::models::youtube::{VideoMetadata, YoutubeVideo};
use crate::domain::repositories::research_repository::ResearchRepository;
use crate::domain::repositories::youtube_repository::YoutubeRepository;
use crate::domain::services::relevance_scorer::{
    score_video_at, VideoVerdict, MARKETING_SEARCH_KEYWORDS, MAX_KEYWORD_SEARCHES,
};
use crate::domain::services::research_source::video_topic;
use crate::domain::services::video_search_service::VideoSearchService;
use crate::workers::worker::AutomationWorkflow;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 单次监控运行的统计
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct MonitorSummary {
    pub channels_checked: usize,
    pub keyword_searches: usize,
    pub failed_requests: usize,
    pub videos_found: usize,
    pub videos_saved: usize,
    pub relevant: usize,
    pub promoted: usize,
    pub discarded: usize,
}

struct Candidate {
    video: VideoMetadata,
    keywords: Vec<String>,
}

/// YouTube 监控工作流
///
/// 检查配置的频道和固定关键词（每次最多 `MAX_KEYWORD_SEARCHES` 个），
/// 对视频评分后保存，评分达到提升门槛的视频写入研究表（每个视频仅一次）
pub struct YoutubeMonitorWorkflow {
    search: Arc<dyn VideoSearchService>,
    youtube: Arc<dyn YoutubeRepository>,
    research: Arc<dyn ResearchRepository>,
    channels: Vec<ChannelSettings>,
    keywords: Vec<String>,
    lookback: Duration,
    max_results: u32,
}

impl YoutubeMonitorWorkflow {
    pub fn new(
        search: Arc<dyn VideoSearchService>,
        youtube: Arc<dyn YoutubeRepository>,
        research: Arc<dyn ResearchRepository>,
        channels: Vec<ChannelSettings>,
    ) -> Self {
        Self {
            search,
            youtube,
            research,
            channels,
            keywords: MARKETING_SEARCH_KEYWORDS
                .iter()
                .take(MAX_KEYWORD_SEARCHES)
                .map(|k| k.to_string())
                .collect(),
            lookback: Duration::hours(48),
            max_results: 10,
        }
    }

    pub fn with_keywords(mut self, mut keywords: Vec<String>) -> Self {
        keywords.truncate(MAX_KEYWORD_SEARCHES);
        self.keywords = keywords;
        self
    }

    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    async fn collect_candidates(
        &self,
        since: DateTime<Utc>,
        now: DateTime<Utc>,
        summary: &mut MonitorSummary,
    ) -> anyhow::Result<Vec<Candidate>> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        let mut last_error = None;

        for channel in &self.channels {
            self.youtube
                .upsert_channel(&channel.channel_id, &channel.name)
                .await
                .context("saving channel failed")?;

            match self
                .search
                .list_channel_videos(&channel.channel_id, since, self.max_results)
                .await
            {
                Ok(videos) => {
                    for video in videos {
                        if seen.insert(video.video_id.clone()) {
                            candidates.push(Candidate {
                                video,
                                keywords: vec!["youtube".to_string(), "video".to_string()],
                            });
                        }
                    }
                    self.youtube
                        .mark_channel_checked(&channel.channel_id, now)
                        .await
                        .context("updating channel check time failed")?;
                }
                Err(e) => {
                    warn!("Listing videos for channel {} failed: {}", channel.name, e);
                    summary.failed_requests += 1;
                    last_error = Some(e.to_string());
                }
            }
            summary.channels_checked += 1;
        }

        for keyword in &self.keywords {
            match self
                .search
                .search_videos(keyword, since, self.max_results)
                .await
            {
                Ok(videos) => {
                    for video in videos {
                        if seen.insert(video.video_id.clone()) {
                            candidates.push(Candidate {
                                video,
                                keywords: vec![keyword.clone()],
                            });
                        }
                    }
                }
                Err(e) => {
                    warn!("Keyword search '{}' failed: {}", keyword, e);
                    summary.failed_requests += 1;
                    last_error = Some(e.to_string());
                }
            }
            summary.keyword_searches += 1;
        }

        let attempted = summary.channels_checked + summary.keyword_searches;
        if attempted > 0 && summary.failed_requests == attempted {
            return Err(anyhow!(
                "all {} video search requests failed: {}",
                attempted,
                last_error.unwrap_or_default()
            ));
        }

        summary.videos_found = candidates.len();
        Ok(candidates)
    }

    async fn process(
        &self,
        candidate: Candidate,
        now: DateTime<Utc>,
        summary: &mut MonitorSummary,
    ) -> anyhow::Result<()> {
        let video = candidate.video;
        let score = score_video_at(&video.title, &video.description, video.published_at, now);
        let verdict = VideoVerdict::from_score(score);

        if verdict == VideoVerdict::Discard {
            debug!("Discarding video {} (score {})", video.video_id, score);
            summary.discarded += 1;
            return Ok(());
        }

        let existing = self
            .youtube
            .find_video(&video.video_id)
            .await
            .context("loading video failed")?;
        let already_promoted = existing
            .as_ref()
            .map(|v| v.promoted_to_research)
            .unwrap_or(false);
        let promote = verdict == VideoVerdict::Promote && !already_promoted;

        if promote {
            let item = ContentResearchItem::from_topic(
                video_topic(&video, score, candidate.keywords),
                now,
            );
            self.research
                .upsert_by_url(&item)
                .await
                .context("promoting video to research failed")?;
            summary.promoted += 1;
        }

        let record = YoutubeVideo {
            id: existing.as_ref().map(|v| v.id).unwrap_or_else(Uuid::new_v4),
            video_id: video.video_id,
            channel_id: video.channel_id,
            channel_title: video.channel_title,
            title: video.title,
            description: video.description,
            published_at: video.published_at,
            relevance_score: score,
            is_relevant: verdict.is_relevant(),
            promoted_to_research: already_promoted || promote,
            discovered_at: existing.map(|v| v.discovered_at).unwrap_or(now),
        };
        self.youtube
            .upsert_video(&record)
            .await
            .context("saving video failed")?;

        summary.videos_saved += 1;
        if verdict.is_relevant() {
            summary.relevant += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl AutomationWorkflow for YoutubeMonitorWorkflow {
    fn job_type(&self) -> JobType {
        JobType::YoutubeMonitor
    }

    async fn execute(&self, job_id: Uuid) -> anyhow::Result<Value> {
        let now = Utc::now();
        let since = now - self.lookback;
        let mut summary = MonitorSummary::default();

        let candidates = self.collect_candidates(since, now, &mut summary).await?;
        for candidate in candidates {
            self.process(candidate, now, &mut summary).await?;
        }

        info!(
            "YouTube monitor job {}: {} found, {} saved, {} promoted",
            job_id, summary.videos_found, summary.videos_saved, summary.promoted
        );

        Ok(serde_json::to_value(&summary)?)
    }
}
