// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::automation_job::{AutomationJob, JobStatus, JobType};
use crate::domain::repositories::automation_job_repository::{
    AutomationJobRepository, JobQueryParams, RepositoryError,
};
use crate::infrastructure::database::entities::automation_job as job_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 自动化任务仓库实现
///
/// 基于SeaORM实现的任务记录数据访问层
#[derive(Clone)]
pub struct AutomationJobRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AutomationJobRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<job_entity::Model> for AutomationJob {
    type Error = RepositoryError;

    fn try_from(model: job_entity::Model) -> Result<Self, Self::Error> {
        let job_type: JobType = model
            .job_type
            .parse()
            .map_err(|_| RepositoryError::InvalidData(format!("job_type '{}'", model.job_type)))?;
        let status: JobStatus = model
            .status
            .parse()
            .map_err(|_| RepositoryError::InvalidData(format!("status '{}'", model.status)))?;

        Ok(Self {
            id: model.id,
            job_type,
            status,
            scheduled_time: model.scheduled_time.with_timezone(&Utc),
            started_at: model.started_at.map(|t| t.with_timezone(&Utc)),
            completed_at: model.completed_at.map(|t| t.with_timezone(&Utc)),
            error_message: model.error_message,
            result_data: model.result_data,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

impl From<AutomationJob> for job_entity::ActiveModel {
    fn from(job: AutomationJob) -> Self {
        Self {
            id: Set(job.id),
            job_type: Set(job.job_type.to_string()),
            status: Set(job.status.to_string()),
            scheduled_time: Set(job.scheduled_time.into()),
            started_at: Set(job.started_at.map(Into::into)),
            completed_at: Set(job.completed_at.map(Into::into)),
            error_message: Set(job.error_message),
            result_data: Set(job.result_data),
            created_at: Set(job.created_at.into()),
        }
    }
}

#[async_trait]
impl AutomationJobRepository for AutomationJobRepositoryImpl {
    async fn create(&self, job: &AutomationJob) -> Result<AutomationJob, RepositoryError> {
        let model: job_entity::ActiveModel = job.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(job.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AutomationJob>, RepositoryError> {
        job_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn update(&self, job: &AutomationJob) -> Result<AutomationJob, RepositoryError> {
        if job_entity::Entity::find_by_id(job.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let model: job_entity::ActiveModel = job.clone().into();
        let updated_model = model.update(self.db.as_ref()).await?;
        updated_model.try_into()
    }

    async fn find_recent(
        &self,
        params: JobQueryParams,
    ) -> Result<Vec<AutomationJob>, RepositoryError> {
        let mut query = job_entity::Entity::find();

        if let Some(job_type) = params.job_type {
            query = query.filter(job_entity::Column::JobType.eq(job_type.to_string()));
        }

        if let Some(statuses) = params.statuses {
            let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
            query = query.filter(job_entity::Column::Status.is_in(statuses));
        }

        query
            .order_by_desc(job_entity::Column::CreatedAt)
            .limit(params.limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn find_latest_by_type(
        &self,
        job_type: JobType,
    ) -> Result<Option<AutomationJob>, RepositoryError> {
        job_entity::Entity::find()
            .filter(job_entity::Column::JobType.eq(job_type.to_string()))
            .order_by_desc(job_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn count_by_status(&self, status: JobStatus) -> Result<u64, RepositoryError> {
        let count = job_entity::Entity::find()
            .filter(job_entity::Column::Status.eq(status.to_string()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn count_finished_before(&self, before: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let before: DateTime<FixedOffset> = before.into();
        let count = job_entity::Entity::find()
            .filter(job_entity::Column::Status.is_in(vec![
                JobStatus::Completed.to_string(),
                JobStatus::Failed.to_string(),
            ]))
            .filter(job_entity::Column::CreatedAt.lt(before))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
