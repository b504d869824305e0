// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::{AutomationJob, DomainError, JobType};
use crate::domain::repositories::automation_job_repository::{
    AutomationJobRepository, RepositoryError,
};
use chrono::Utc;
use dashmap::DashMap;
use metrics::{counter, histogram};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

/// 调度错误类型
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// 同类型任务正在运行
    #[error("A {0} job is already running")]
    AlreadyRunning(JobType),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// cron 任务注册失败
    #[error("Failed to register scheduled job: {0}")]
    Registration(String),

    /// 未知时区
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    /// 没有为该类型注册工作流
    #[error("No workflow registered for {0}")]
    UnknownWorkflow(JobType),

    /// 任务执行体异常终止（panic 或运行时关闭）
    #[error("{0} job aborted: {1}")]
    Aborted(JobType, String),
}

/// 任务跟踪器
///
/// 每次运行创建一条 AutomationJob 记录，并把记录ID传入任务闭包；
/// 结束时使用同一ID写回 completed 或 failed 状态
pub struct JobTracker {
    repo: Arc<dyn AutomationJobRepository>,
    locks: DashMap<JobType, Arc<Mutex<()>>>,
}

impl JobTracker {
    pub fn new(repo: Arc<dyn AutomationJobRepository>) -> Self {
        Self {
            repo,
            locks: DashMap::new(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn AutomationJobRepository> {
        &self.repo
    }

    /// 检查某类型任务是否正在运行
    pub fn is_running(&self, job_type: JobType) -> bool {
        self.locks
            .get(&job_type)
            .map(|lock| {
                let busy = lock.try_lock().is_err();
                busy
            })
            .unwrap_or(false)
    }

    /// 在任务跟踪下执行闭包
    ///
    /// # 参数
    ///
    /// * `job_type` - 任务类型
    /// * `job_fn` - 接收任务记录ID的异步闭包
    ///
    /// # 返回值
    ///
    /// * `Ok(AutomationJob)` - 最终状态的任务记录（completed 或 failed）
    /// * `Err(SchedulerError::AlreadyRunning)` - 同类型任务进行中，不创建记录
    /// * `Err(SchedulerError)` - 记录读写失败
    pub async fn run_with_job_tracking<F, Fut>(
        &self,
        job_type: JobType,
        job_fn: F,
    ) -> Result<AutomationJob, SchedulerError>
    where
        F: FnOnce(Uuid) -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        let lock = self
            .locks
            .entry(job_type)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock
            .try_lock_owned()
            .map_err(|_| SchedulerError::AlreadyRunning(job_type))?;

        let job = self
            .repo
            .create(&AutomationJob::new(job_type, Utc::now()))
            .await?;
        let job = self.repo.update(&job.start()?).await?;
        let job_id = job.id;
        info!("Started {} job {}", job_type, job_id);

        let started = Instant::now();
        let finished = match job_fn(job_id).await {
            Ok(result) => {
                info!("{} job {} completed", job_type, job_id);
                job.complete(result)?
            }
            Err(e) => {
                error!("{} job {} failed: {:#}", job_type, job_id, e);
                job.fail(format!("{:#}", e))?
            }
        };
        let finished = self.repo.update(&finished).await?;

        counter!(
            "automation_jobs_total",
            "job_type" => job_type.as_str(),
            "status" => finished.status.to_string()
        )
        .increment(1);
        histogram!("automation_job_duration_seconds", "job_type" => job_type.as_str())
            .record(started.elapsed().as_secs_f64());

        Ok(finished)
    }
}
