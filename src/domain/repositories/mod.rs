// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层基于 SeaORM 提供。
///
/// 包含的仓库接口：
/// - 自动化任务仓库（automation_job_repository）：任务记录与仓库错误类型
/// - 博客文章仓库（blog_post_repository）
/// - 表单提交仓库（form_submission_repository）
/// - 新闻通讯仓库（newsletter_repository）
/// - 研究条目仓库（research_repository）
/// - YouTube 仓库（youtube_repository）
pub mod automation_job_repository;
pub mod blog_post_repository;
pub mod form_submission_repository;
pub mod newsletter_repository;
pub mod research_repository;
pub mod youtube_repository;
