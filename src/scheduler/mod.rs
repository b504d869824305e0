// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 调度模块
///
/// - 任务跟踪（job_tracker）：为每次运行记录 AutomationJob 并保证同类型单实例
/// - 自动化调度器（automation_scheduler）：注册 cron 任务与手动触发
pub mod automation_scheduler;
pub mod job_tracker;

pub use automation_scheduler::AutomationScheduler;
pub use job_tracker::{JobTracker, SchedulerError};
