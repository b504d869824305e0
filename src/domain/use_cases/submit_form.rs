// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::form_submission::FormSubmission;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::form_submission_repository::FormSubmissionRepository;
use crate::domain::services::email_dispatcher::EmailDispatcher;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

pub struct SubmitFormUseCase {
    repo: Arc<dyn FormSubmissionRepository>,
    dispatcher: Arc<EmailDispatcher>,
}

impl SubmitFormUseCase {
    pub fn new(repo: Arc<dyn FormSubmissionRepository>, dispatcher: Arc<EmailDispatcher>) -> Self {
        Self { repo, dispatcher }
    }

    /// 保存表单并在后台发送通知
    ///
    /// 保存成功即返回，通知结果不影响返回值
    pub async fn execute(
        &self,
        submission: FormSubmission,
    ) -> Result<(FormSubmission, JoinHandle<()>), RepositoryError> {
        let stored = self.repo.create(&submission).await?;

        let dispatcher = self.dispatcher.clone();
        let notification = stored.clone();
        let handle = tokio::spawn(async move {
            let report = dispatcher.send_form_notification(&notification).await;
            info!(
                "Form {} notification: {} sent, {} failed",
                notification.id, report.success_count, report.failure_count
            );
        });

        Ok((stored, handle))
    }
}
