// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_automation_jobs;
mod m20260101_000002_create_content_research;
mod m20260101_000003_create_blog_posts;
mod m20260101_000004_create_newsletter_campaigns;
mod m20260101_000005_create_youtube_tables;
mod m20260101_000006_create_form_submissions;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回迁移列表
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_automation_jobs::Migration),
            Box::new(m20260101_000002_create_content_research::Migration),
            Box::new(m20260101_000003_create_blog_posts::Migration),
            Box::new(m20260101_000004_create_newsletter_campaigns::Migration),
            Box::new(m20260101_000005_create_youtube_tables::Migration),
            Box::new(m20260101_000006_create_form_submissions::Migration),
        ]
    }
}
