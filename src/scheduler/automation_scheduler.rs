// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SchedulerSettings;
use crate::domain::models::automation_job::{AutomationJob, JobType};
use crate::scheduler::job_tracker::{JobTracker, SchedulerError};
use crate::workers::worker::AutomationWorkflow;
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};
use uuid::Uuid;

/// 解析 IANA 时区名称
pub fn parse_timezone(name: &str) -> Result<Tz, SchedulerError> {
    name.parse::<Tz>()
        .map_err(|_| SchedulerError::InvalidTimezone(name.to_string()))
}

/// 自动化调度器
///
/// 由 main 显式构造并持有；cron 触发与手动触发都经过同一个 `JobTracker`
pub struct AutomationScheduler {
    tracker: Arc<JobTracker>,
    workflows: HashMap<JobType, Arc<dyn AutomationWorkflow>>,
}

impl AutomationScheduler {
    pub fn new(tracker: Arc<JobTracker>) -> Self {
        Self {
            tracker,
            workflows: HashMap::new(),
        }
    }

    /// 注册工作流，同类型后注册者覆盖先注册者
    pub fn register(mut self, workflow: Arc<dyn AutomationWorkflow>) -> Self {
        self.workflows.insert(workflow.job_type(), workflow);
        self
    }

    pub fn tracker(&self) -> &Arc<JobTracker> {
        &self.tracker
    }

    /// 已注册的任务类型，按固定顺序
    pub fn registered_types(&self) -> Vec<JobType> {
        JobType::ALL
            .iter()
            .copied()
            .filter(|t| self.workflows.contains_key(t))
            .collect()
    }

    /// 手动触发一次任务，等待其结束
    ///
    /// 任务在独立的 tokio 任务中运行，调用方被取消时任务仍会执行完毕并写回最终状态
    pub async fn trigger(&self, job_type: JobType) -> Result<AutomationJob, SchedulerError> {
        let workflow = self
            .workflows
            .get(&job_type)
            .cloned()
            .ok_or(SchedulerError::UnknownWorkflow(job_type))?;

        let tracker = Arc::clone(&self.tracker);
        let handle = tokio::spawn(async move {
            tracker
                .run_with_job_tracking(job_type, move |job_id| async move {
                    workflow.execute(job_id).await
                })
                .await
        });

        handle
            .await
            .map_err(|e| SchedulerError::Aborted(job_type, e.to_string()))?
    }

    /// 注册一个周期性任务
    ///
    /// cron 表达式为 6 段格式（秒 分 时 日 月 周），非法表达式返回 `Registration` 错误
    pub async fn schedule(
        self: &Arc<Self>,
        scheduler: &JobScheduler,
        cron_expression: &str,
        timezone: Tz,
        job_type: JobType,
    ) -> Result<Uuid, SchedulerError> {
        if !self.workflows.contains_key(&job_type) {
            return Err(SchedulerError::UnknownWorkflow(job_type));
        }

        let this = Arc::clone(self);
        let job = Job::new_async_tz(cron_expression, timezone, move |_uuid, _lock| {
            let this = this.clone();
            Box::pin(async move {
                match this.trigger(job_type).await {
                    Ok(job) => info!("Scheduled {} run finished as {}", job_type, job.status),
                    Err(SchedulerError::AlreadyRunning(_)) => {
                        warn!("Skipping scheduled {} run, previous run still in progress", job_type)
                    }
                    Err(e) => error!("Scheduled {} run could not be tracked: {}", job_type, e),
                }
            })
        })
        .map_err(|e| {
            SchedulerError::Registration(format!("{} ('{}'): {}", job_type, cron_expression, e))
        })?;

        let id = scheduler
            .add(job)
            .await
            .map_err(|e| SchedulerError::Registration(e.to_string()))?;

        info!(
            "Registered {} with cron '{}' ({})",
            job_type, cron_expression, timezone
        );
        Ok(id)
    }

    /// 按配置注册所有已知工作流并启动调度
    pub async fn start(
        self: &Arc<Self>,
        settings: &SchedulerSettings,
    ) -> Result<JobScheduler, SchedulerError> {
        let timezone = parse_timezone(&settings.timezone)?;
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| SchedulerError::Registration(e.to_string()))?;

        let schedules = [
            (JobType::DailyBlog, settings.daily_blog_cron.as_str()),
            (JobType::MonthlyNewsletter, settings.monthly_newsletter_cron.as_str()),
            (JobType::YoutubeMonitor, settings.youtube_monitor_cron.as_str()),
            (JobType::Cleanup, settings.cleanup_cron.as_str()),
        ];

        for (job_type, cron_expression) in schedules {
            if self.workflows.contains_key(&job_type) {
                self.schedule(&scheduler, cron_expression, timezone, job_type)
                    .await?;
            }
        }

        scheduler
            .start()
            .await
            .map_err(|e| SchedulerError::Registration(e.to_string()))?;

        info!(
            "Automation scheduler started with {} jobs in {}",
            self.workflows.len(),
            timezone
        );
        Ok(scheduler)
    }
}
