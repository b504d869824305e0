// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

use crate::domain::models::automation_job::DomainError;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::scheduler::SchedulerError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 根据错误链中的具体类型确定HTTP状态码
    pub fn status_code(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            return match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Database(_) | RepositoryError::InvalidData(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
        }

        if let Some(err) = self.0.downcast_ref::<SchedulerError>() {
            return match err {
                SchedulerError::AlreadyRunning(_) => StatusCode::CONFLICT,
                SchedulerError::UnknownWorkflow(_) => StatusCode::NOT_FOUND,
                SchedulerError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }

        if self.0.downcast_ref::<ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }

        match self.0.downcast_ref::<DomainError>() {
            Some(DomainError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Some(DomainError::InvalidStateTransition { .. }) => StatusCode::CONFLICT,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
