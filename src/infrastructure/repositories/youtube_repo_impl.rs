// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::youtube::{YoutubeChannel, YoutubeVideo};
use crate::domain::repositories::automation_job_repository::RepositoryError;
use crate::domain::repositories::youtube_repository::YoutubeRepository;
use crate::infrastructure::database::entities::{
    youtube_channel as channel_entity, youtube_video as video_entity,
};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// YouTube 频道与视频仓库实现
#[derive(Clone)]
pub struct YoutubeRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl YoutubeRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<channel_entity::Model> for YoutubeChannel {
    fn from(model: channel_entity::Model) -> Self {
        Self {
            id: model.id,
            channel_id: model.channel_id,
            name: model.name,
            is_active: model.is_active,
            last_checked_at: model.last_checked_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

impl From<video_entity::Model> for YoutubeVideo {
    fn from(model: video_entity::Model) -> Self {
        Self {
            id: model.id,
            video_id: model.video_id,
            channel_id: model.channel_id,
            channel_title: model.channel_title,
            title: model.title,
            description: model.description,
            published_at: model.published_at.with_timezone(&Utc),
            relevance_score: model.relevance_score,
            is_relevant: model.is_relevant,
            promoted_to_research: model.promoted_to_research,
            discovered_at: model.discovered_at.with_timezone(&Utc),
        }
    }
}

impl From<YoutubeVideo> for video_entity::ActiveModel {
    fn from(video: YoutubeVideo) -> Self {
        Self {
            id: Set(video.id),
            video_id: Set(video.video_id),
            channel_id: Set(video.channel_id),
            channel_title: Set(video.channel_title),
            title: Set(video.title),
            description: Set(video.description),
            published_at: Set(video.published_at.into()),
            relevance_score: Set(video.relevance_score),
            is_relevant: Set(video.is_relevant),
            promoted_to_research: Set(video.promoted_to_research),
            discovered_at: Set(video.discovered_at.into()),
        }
    }
}

#[async_trait]
impl YoutubeRepository for YoutubeRepositoryImpl {
    async fn upsert_channel(
        &self,
        channel_id: &str,
        name: &str,
    ) -> Result<YoutubeChannel, RepositoryError> {
        let existing = channel_entity::Entity::find()
            .filter(channel_entity::Column::ChannelId.eq(channel_id))
            .one(self.db.as_ref())
            .await?;

        let stored = match existing {
            Some(existing) => {
                let mut model: channel_entity::ActiveModel = existing.into();
                model.name = Set(name.to_string());
                model.is_active = Set(true);
                model.update(self.db.as_ref()).await?
            }
            None => {
                let model = channel_entity::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    channel_id: Set(channel_id.to_string()),
                    name: Set(name.to_string()),
                    is_active: Set(true),
                    last_checked_at: Set(None),
                };
                model.insert(self.db.as_ref()).await?
            }
        };

        Ok(stored.into())
    }

    async fn mark_channel_checked(
        &self,
        channel_id: &str,
        checked_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let checked_at: DateTime<FixedOffset> = checked_at.into();
        channel_entity::Entity::update_many()
            .col_expr(
                channel_entity::Column::LastCheckedAt,
                Expr::value(Some(checked_at)),
            )
            .filter(channel_entity::Column::ChannelId.eq(channel_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn find_video(&self, video_id: &str) -> Result<Option<YoutubeVideo>, RepositoryError> {
        let model = video_entity::Entity::find()
            .filter(video_entity::Column::VideoId.eq(video_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn upsert_video(&self, video: &YoutubeVideo) -> Result<YoutubeVideo, RepositoryError> {
        let existing = video_entity::Entity::find()
            .filter(video_entity::Column::VideoId.eq(video.video_id.as_str()))
            .one(self.db.as_ref())
            .await?;

        let stored = match existing {
            Some(existing) => {
                let mut model: video_entity::ActiveModel = video.clone().into();
                model.id = Set(existing.id);
                model.discovered_at = Set(existing.discovered_at);
                model.update(self.db.as_ref()).await?
            }
            None => {
                let model: video_entity::ActiveModel = video.clone().into();
                model.insert(self.db.as_ref()).await?
            }
        };

        Ok(stored.into())
    }
}
