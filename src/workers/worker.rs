// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::JobType;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// 自动化工作流 trait
///
/// 所有定时工作流都必须实现此trait，由调度器在任务跟踪下执行
#[async_trait]
pub trait AutomationWorkflow: Send + Sync {
    /// 工作流对应的任务类型
    fn job_type(&self) -> JobType;

    /// 执行工作流
    ///
    /// # 参数
    ///
    /// * `job_id` - 本次运行对应的任务记录ID
    ///
    /// # 返回值
    ///
    /// * `Ok(Value)` - 写入任务记录 `result_data` 的结果
    /// * `Err` - 错误信息写入任务记录 `error_message`
    async fn execute(&self, job_id: Uuid) -> anyhow::Result<Value>;
}
