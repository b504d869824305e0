// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::{AutomationJob, JobStatus, JobType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

/// 任务列表查询参数
#[derive(Debug, Default, Deserialize, Validate)]
pub struct JobListQuery {
    /// 返回条数，默认 50
    #[validate(range(min = 1, max = 200))]
    pub limit: Option<u64>,

    /// 任务类型过滤，例如 "daily_blog"
    pub job_type: Option<String>,
}

/// 任务记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationJobDto {
    pub id: Uuid,
    pub job_type: JobType,
    pub status: JobStatus,
    pub scheduled_time: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_ms: Option<i64>,
    pub error_message: Option<String>,
    pub result_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<AutomationJob> for AutomationJobDto {
    fn from(job: AutomationJob) -> Self {
        Self {
            duration_ms: job.duration().map(|d| d.num_milliseconds()),
            id: job.id,
            job_type: job.job_type,
            status: job.status,
            scheduled_time: job.scheduled_time,
            started_at: job.started_at,
            completed_at: job.completed_at,
            error_message: job.error_message,
            result_data: job.result_data,
            created_at: job.created_at,
        }
    }
}

/// 任务列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<AutomationJobDto>,
    pub count: usize,
}

/// 单个任务类型的状态
#[derive(Debug, Serialize, Deserialize)]
pub struct JobTypeStatus {
    pub registered: bool,
    pub running: bool,
    pub last_run: Option<AutomationJobDto>,
}

/// 自动化状态响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AutomationStatusResponse {
    pub scheduler_enabled: bool,
    pub timezone: String,
    /// 以任务类型为键
    pub jobs: BTreeMap<String, JobTypeStatus>,
    /// 以任务状态为键的记录数量
    pub counts: BTreeMap<String, u64>,
}

/// 手动触发响应
#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub job: AutomationJobDto,
}
