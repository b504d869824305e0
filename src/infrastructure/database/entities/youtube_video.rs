// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "youtube_videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub video_id: String,
    pub channel_id: String,
    pub channel_title: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub published_at: ChronoDateTimeWithTimeZone,
    pub relevance_score: i32,
    pub is_relevant: bool,
    pub promoted_to_research: bool,
    pub discovered_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
