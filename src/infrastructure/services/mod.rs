// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 外部提供商接口的 HTTP 客户端实现
pub mod mailjet_email_service;
pub mod youtube_data_api;
