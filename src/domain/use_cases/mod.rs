// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域用例模块
///
/// 当前的用例：
/// - 提交表单（submit_form）：保存线索表单并异步通知团队
pub mod submit_form;
