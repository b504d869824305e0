// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 新闻通讯活动
///
/// 每次运行创建一条，发送结束后回写最终计数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterCampaign {
    pub id: Uuid,
    pub subject: String,
    /// 纯文本正文
    pub content: String,
    pub html_content: String,
    pub recipient_count: i32,
    pub success_count: i32,
    pub failure_count: i32,
    pub status: CampaignStatus,
    pub topics: Vec<String>,
    /// 正文是否来自兜底内容
    pub is_fallback: bool,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Sending,
    Sent,
    Failed,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Sending => write!(f, "sending"),
            CampaignStatus::Sent => write!(f, "sent"),
            CampaignStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "sending" => Ok(CampaignStatus::Sending),
            "sent" => Ok(CampaignStatus::Sent),
            "failed" => Ok(CampaignStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 新闻通讯草稿（主题 + 正文）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterDraft {
    pub subject: String,
    pub content: String,
}

impl NewsletterCampaign {
    /// 以发送中状态创建活动
    pub fn sending(
        draft: &NewsletterDraft,
        html_content: String,
        topics: Vec<String>,
        recipient_count: usize,
        is_fallback: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: draft.subject.clone(),
            content: draft.content.clone(),
            html_content,
            recipient_count: recipient_count as i32,
            success_count: 0,
            failure_count: 0,
            status: CampaignStatus::Sending,
            topics,
            is_fallback,
            created_at: Utc::now(),
            sent_at: None,
        }
    }

    /// 回写发送结果
    ///
    /// 有收件人但全部失败时标记为 Failed，否则为 Sent
    pub fn record_delivery(&mut self, success_count: usize, failure_count: usize) {
        self.success_count = success_count as i32;
        self.failure_count = failure_count as i32;
        self.status = if self.recipient_count > 0 && success_count == 0 {
            CampaignStatus::Failed
        } else {
            CampaignStatus::Sent
        };
        self.sent_at = Some(Utc::now());
    }
}
