// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::form_submission::{FormSubmission, FormType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 表单提交请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct FormSubmissionRequest {
    pub form_type: FormType,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 200))]
    pub company: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 5000))]
    pub message: Option<String>,

    #[serde(default)]
    pub newsletter_opt_in: bool,

    #[validate(length(max = 200))]
    pub source: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FormSubmissionRequest {
    /// 转换为领域对象
    ///
    /// 新闻通讯表单总是视为订阅
    pub fn into_submission(self, now: DateTime<Utc>) -> FormSubmission {
        FormSubmission {
            id: Uuid::new_v4(),
            newsletter_opt_in: self.newsletter_opt_in || self.form_type == FormType::Newsletter,
            form_type: self.form_type,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            company: non_empty(self.company),
            phone: non_empty(self.phone),
            message: non_empty(self.message),
            source: non_empty(self.source),
            created_at: now,
        }
    }
}

/// 表单提交响应
#[derive(Debug, Serialize, Deserialize)]
pub struct FormSubmissionResponse {
    pub id: Uuid,
    pub status: String,
}
