// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 自动化任务记录
///
/// 每次自动化运行（定时触发或手动触发）对应一条记录，
/// 记录任务类型、状态、时间戳以及执行结果或错误信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationJob {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 任务类型，决定执行哪个工作流
    pub job_type: JobType,
    /// 任务状态
    pub status: JobStatus,
    /// 触发时间
    pub scheduled_time: DateTime<Utc>,
    /// 开始执行时间
    pub started_at: Option<DateTime<Utc>>,
    /// 完成时间（成功或失败）
    pub completed_at: Option<DateTime<Utc>>,
    /// 失败时的错误信息
    pub error_message: Option<String>,
    /// 工作流返回的结果数据
    pub result_data: serde_json::Value,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 自动化任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// 每日博客生成与发布
    DailyBlog,
    /// 月度新闻通讯
    MonthlyNewsletter,
    /// YouTube 频道与关键词监控
    YoutubeMonitor,
    /// 历史数据清理（仅报告）
    Cleanup,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::DailyBlog,
        JobType::MonthlyNewsletter,
        JobType::YoutubeMonitor,
        JobType::Cleanup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::DailyBlog => "daily_blog",
            JobType::MonthlyNewsletter => "monthly_newsletter",
            JobType::YoutubeMonitor => "youtube_monitor",
            JobType::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily_blog" => Ok(JobType::DailyBlog),
            "monthly_newsletter" => Ok(JobType::MonthlyNewsletter),
            "youtube_monitor" => Ok(JobType::YoutubeMonitor),
            "cleanup" => Ok(JobType::Cleanup),
            other => Err(DomainError::ValidationError(format!(
                "unknown job type: {}",
                other
            ))),
        }
    }
}

/// 自动化任务状态
///
/// 状态转换严格遵循：
/// Pending → Running → Completed/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// 已创建，尚未开始
    #[default]
    Pending,
    /// 执行中
    Running,
    /// 执行成功
    Completed,
    /// 执行失败
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(DomainError::ValidationError(format!(
                "unknown job status: {}",
                other
            ))),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: JobStatus, to: JobStatus },

    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AutomationJob {
    /// 创建一个待执行的任务记录
    ///
    /// # 参数
    ///
    /// * `job_type` - 任务类型
    /// * `scheduled_time` - 触发时间
    pub fn new(job_type: JobType, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_type,
            status: JobStatus::Pending,
            scheduled_time,
            started_at: None,
            completed_at: None,
            error_message: None,
            result_data: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    /// 开始执行
    ///
    /// 将任务状态从 Pending 变更为 Running
    pub fn start(mut self) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Pending => {
                self.status = JobStatus::Running;
                self.started_at = Some(Utc::now());
                Ok(self)
            }
            from => Err(DomainError::InvalidStateTransition {
                from,
                to: JobStatus::Running,
            }),
        }
    }

    /// 标记完成并记录结果
    ///
    /// 将任务状态从 Running 变更为 Completed
    pub fn complete(mut self, result_data: serde_json::Value) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Completed;
                self.completed_at = Some(Utc::now());
                self.result_data = result_data;
                Ok(self)
            }
            from => Err(DomainError::InvalidStateTransition {
                from,
                to: JobStatus::Completed,
            }),
        }
    }

    /// 标记失败并记录错误信息
    ///
    /// 将任务状态从 Running 变更为 Failed
    pub fn fail(mut self, error_message: impl Into<String>) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Failed;
                self.completed_at = Some(Utc::now());
                self.error_message = Some(error_message.into());
                Ok(self)
            }
            from => Err(DomainError::InvalidStateTransition {
                from,
                to: JobStatus::Failed,
            }),
        }
    }

    /// 执行耗时（仅终止状态有值）
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed - started),
            _ => None,
        }
    }
}
