// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::{AutomationJob, JobStatus, JobType};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,

    /// 存储的数据无法还原为领域对象
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// 任务记录查询参数
#[derive(Debug, Clone)]
pub struct JobQueryParams {
    pub job_type: Option<JobType>,
    pub statuses: Option<Vec<JobStatus>>,
    pub limit: u64,
}

impl Default for JobQueryParams {
    fn default() -> Self {
        Self {
            job_type: None,
            statuses: None,
            limit: 50,
        }
    }
}

/// 自动化任务仓库特质
///
/// 任务记录只由调度器创建和更新，从不删除
#[async_trait]
pub trait AutomationJobRepository: Send + Sync {
    /// 创建任务记录
    async fn create(&self, job: &AutomationJob) -> Result<AutomationJob, RepositoryError>;
    /// 根据ID查找任务记录
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AutomationJob>, RepositoryError>;
    /// 更新任务记录（按ID）
    async fn update(&self, job: &AutomationJob) -> Result<AutomationJob, RepositoryError>;
    /// 按触发时间倒序查询任务记录
    async fn find_recent(
        &self,
        params: JobQueryParams,
    ) -> Result<Vec<AutomationJob>, RepositoryError>;
    /// 某类型最近一次运行
    async fn find_latest_by_type(
        &self,
        job_type: JobType,
    ) -> Result<Option<AutomationJob>, RepositoryError>;
    /// 按状态统计数量
    async fn count_by_status(&self, status: JobStatus) -> Result<u64, RepositoryError>;
    /// 统计早于给定时间的已结束任务数量
    async fn count_finished_before(&self, before: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
