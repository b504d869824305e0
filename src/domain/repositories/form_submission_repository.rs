// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::form_submission::FormSubmission;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use async_trait::async_trait;

/// 表单提交仓库特质
#[async_trait]
pub trait FormSubmissionRepository: Send + Sync {
    async fn create(&self, submission: &FormSubmission) -> Result<FormSubmission, RepositoryError>;
    /// 订阅了新闻通讯的去重邮箱列表
    async fn find_newsletter_recipients(&self) -> Result<Vec<String>, RepositoryError>;
}
