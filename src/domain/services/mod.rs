// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含内容自动化流水线的核心服务：研究数据收集、内容生成、
/// 发布与邮件分发，以及外部提供商的抽象接口
pub mod content_generator;
pub mod email_dispatcher;
pub mod email_service;
pub mod image_service;
pub mod llm_service;
pub mod publisher;
pub mod relevance_scorer;
pub mod research_gatherer;
pub mod research_source;
pub mod templates;
pub mod video_search_service;
