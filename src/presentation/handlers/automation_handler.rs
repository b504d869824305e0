// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::automation_dto::{
    AutomationJobDto, AutomationStatusResponse, JobListQuery, JobListResponse, JobTypeStatus,
    TriggerResponse,
};
use crate::domain::models::automation_job::{DomainError, JobStatus, JobType};
use crate::domain::repositories::automation_job_repository::{
    AutomationJobRepository, JobQueryParams,
};
use crate::presentation::errors::AppError;
use crate::scheduler::AutomationScheduler;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// 调度器运行信息，用于状态接口
#[derive(Debug, Clone)]
pub struct SchedulerInfo {
    pub enabled: bool,
    pub timezone: String,
}

/// 将URL中的工作流名称映射为任务类型
pub fn workflow_job_type(workflow: &str) -> Option<JobType> {
    match workflow {
        "daily-blog" => Some(JobType::DailyBlog),
        "monthly-newsletter" => Some(JobType::MonthlyNewsletter),
        "youtube-monitoring" => Some(JobType::YoutubeMonitor),
        "cleanup" => Some(JobType::Cleanup),
        _ => None,
    }
}

/// 手动触发工作流
///
/// 同步等待运行结束，返回任务记录（可能是 failed 状态）。
/// 同类型任务正在运行时返回 409
pub async fn trigger_workflow(
    Extension(scheduler): Extension<Arc<AutomationScheduler>>,
    Path(workflow): Path<String>,
) -> Result<Json<TriggerResponse>, AppError> {
    let job_type = workflow_job_type(&workflow)
        .ok_or_else(|| DomainError::ValidationError(format!("unknown workflow: {}", workflow)))?;

    info!("Manual trigger for {}", job_type);
    let job = scheduler.trigger(job_type).await?;

    Ok(Json(TriggerResponse { job: job.into() }))
}

/// 自动化状态
pub async fn automation_status(
    Extension(scheduler): Extension<Arc<AutomationScheduler>>,
    Extension(repo): Extension<Arc<dyn AutomationJobRepository>>,
    Extension(info): Extension<SchedulerInfo>,
) -> Result<Json<AutomationStatusResponse>, AppError> {
    let registered = scheduler.registered_types();

    let mut jobs = BTreeMap::new();
    for job_type in JobType::ALL {
        let last_run = repo
            .find_latest_by_type(job_type)
            .await?
            .map(AutomationJobDto::from);
        jobs.insert(
            job_type.to_string(),
            JobTypeStatus {
                registered: registered.contains(&job_type),
                running: scheduler.tracker().is_running(job_type),
                last_run,
            },
        );
    }

    let mut counts = BTreeMap::new();
    for status in [
        JobStatus::Pending,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::Failed,
    ] {
        counts.insert(status.to_string(), repo.count_by_status(status).await?);
    }

    Ok(Json(AutomationStatusResponse {
        scheduler_enabled: info.enabled,
        timezone: info.timezone,
        jobs,
        counts,
    }))
}

/// 最近的任务记录
pub async fn list_jobs(
    Extension(repo): Extension<Arc<dyn AutomationJobRepository>>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    query.validate()?;

    let job_type = query
        .job_type
        .as_deref()
        .map(str::parse::<JobType>)
        .transpose()?;

    let jobs: Vec<AutomationJobDto> = repo
        .find_recent(JobQueryParams {
            job_type,
            statuses: None,
            limit: query.limit.unwrap_or(50),
        })
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(JobListResponse {
        count: jobs.len(),
        jobs,
    }))
}
