// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的具体实现
pub mod automation_job_repo_impl;
pub mod blog_post_repo_impl;
pub mod form_submission_repo_impl;
pub mod newsletter_repo_impl;
pub mod research_repo_impl;
pub mod youtube_repo_impl;
