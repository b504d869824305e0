// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 自动化任务（automation_job）：每次自动化运行的记录
/// - 博客文章（blog_post）：生成并发布的文章
/// - 表单提交（form_submission）：线索与联系表单
/// - 新闻通讯（newsletter）：月度通讯活动
/// - 研究条目（research_item）：内容生成所依据的话题
/// - YouTube（youtube）：被监控的频道与视频
pub mod automation_job;
pub mod blog_post;
pub mod form_submission;
pub mod newsletter;
pub mod research_item;
pub mod youtube;
