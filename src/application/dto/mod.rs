// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义HTTP接口的请求和响应结构，请求DTO通过 validator 校验
pub mod automation_dto;
pub mod blog_post_dto;
pub mod form_submission_dto;
