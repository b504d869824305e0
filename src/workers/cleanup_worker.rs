// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::JobType;
use crate::domain::repositories::automation_job_repository::AutomationJobRepository;
use crate::workers::worker::AutomationWorkflow;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 清理工作流
///
/// 仅统计超过保留期的已结束任务记录，不做删除
pub struct CleanupWorkflow {
    repository: Arc<dyn AutomationJobRepository>,
    retention_days: i64,
}

impl CleanupWorkflow {
    pub fn new(repository: Arc<dyn AutomationJobRepository>, retention_days: i64) -> Self {
        Self {
            repository,
            retention_days,
        }
    }
}

#[async_trait]
impl AutomationWorkflow for CleanupWorkflow {
    fn job_type(&self) -> JobType {
        JobType::Cleanup
    }

    async fn execute(&self, job_id: Uuid) -> anyhow::Result<Value> {
        let retention = Duration::try_days(self.retention_days)
            .filter(|d| *d > Duration::zero())
            .ok_or_else(|| anyhow!("invalid retention period: {} days", self.retention_days))?;
        let cutoff = Utc::now()
            .checked_sub_signed(retention)
            .ok_or_else(|| anyhow!("retention period of {} days is out of range", self.retention_days))?;
        let would_delete = self
            .repository
            .count_finished_before(cutoff)
            .await
            .context("counting expired job records failed")?;

        info!(
            "Cleanup job {}: {} job records older than {} days",
            job_id, would_delete, self.retention_days
        );

        Ok(json!({
            "would_delete": would_delete,
            "deleted": 0,
            "retention_days": self.retention_days,
            "cutoff": cutoff,
        }))
    }
}

#[cfg(test)]
#[path = "cleanup_worker_test.rs"]
mod tests;
