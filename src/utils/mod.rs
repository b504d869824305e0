// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供 slug 生成与日志初始化等通用功能
pub mod slug;
pub mod telemetry;
