// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::form_submission_dto::{
    FormSubmissionRequest, FormSubmissionResponse,
};
use crate::domain::use_cases::submit_form::SubmitFormUseCase;
use crate::presentation::errors::AppError;
use axum::{http::StatusCode, Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// 提交表单
///
/// 保存成功即返回 201，通知邮件在后台发送
pub async fn create_form_submission(
    Extension(use_case): Extension<Arc<SubmitFormUseCase>>,
    Json(payload): Json<FormSubmissionRequest>,
) -> Result<(StatusCode, Json<FormSubmissionResponse>), AppError> {
    payload.validate()?;

    let (submission, _notification) = use_case.execute(payload.into_submission(Utc::now())).await?;
    info!(
        "Stored {} form submission {}",
        submission.form_type, submission.id
    );

    Ok((
        StatusCode::CREATED,
        Json(FormSubmissionResponse {
            id: submission.id,
            status: "received".to_string(),
        }),
    ))
}
