// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::form_submission::FormSubmission;
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::form_submission_repository::FormSubmissionRepository;
use crate::infrastructure::database::entities::form_submission as submission_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashSet;
use std::sync::Arc;

/// 表单提交仓库实现
#[derive(Clone)]
pub struct FormSubmissionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl FormSubmissionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<submission_entity::Model> for FormSubmission {
    type Error = RepositoryError;

    fn try_from(model: submission_entity::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            form_type: model
                .form_type
                .parse()
                .map_err(|_| RepositoryError::InvalidData(format!("form_type '{}'", model.form_type)))?,
            name: model.name,
            email: model.email,
            company: model.company,
            phone: model.phone,
            message: model.message,
            newsletter_opt_in: model.newsletter_opt_in,
            source: model.source,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

impl From<FormSubmission> for submission_entity::ActiveModel {
    fn from(submission: FormSubmission) -> Self {
        Self {
            id: Set(submission.id),
            form_type: Set(submission.form_type.to_string()),
            name: Set(submission.name),
            email: Set(submission.email),
            company: Set(submission.company),
            phone: Set(submission.phone),
            message: Set(submission.message),
            newsletter_opt_in: Set(submission.newsletter_opt_in),
            source: Set(submission.source),
            created_at: Set(submission.created_at.into()),
        }
    }
}

#[async_trait]
impl FormSubmissionRepository for FormSubmissionRepositoryImpl {
    async fn create(&self, submission: &FormSubmission) -> Result<FormSubmission, RepositoryError> {
        let model: submission_entity::ActiveModel = submission.clone().into();
        let inserted = model.insert(self.db.as_ref()).await?;
        inserted.try_into()
    }

    async fn find_newsletter_recipients(&self) -> Result<Vec<String>, RepositoryError> {
        let emails: Vec<String> = submission_entity::Entity::find()
            .select_only()
            .column(submission_entity::Column::Email)
            .filter(submission_entity::Column::NewsletterOptIn.eq(true))
            .order_by_asc(submission_entity::Column::CreatedAt)
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        let mut seen = HashSet::new();
        Ok(emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty() && seen.insert(email.clone()))
            .collect())
    }
}
