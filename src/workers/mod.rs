// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 每个定时任务类型对应一个工作流实现
pub mod cleanup_worker;
pub mod daily_blog_worker;
pub mod newsletter_worker;
pub mod worker;
pub mod youtube_monitor_worker;

pub use worker::AutomationWorkflow;
