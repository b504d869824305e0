use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(YoutubeChannels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(YoutubeChannels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(YoutubeChannels::ChannelId).string().not_null())
                    .col(ColumnDef::new(YoutubeChannels::Name).string().not_null())
                    .col(
                        ColumnDef::new(YoutubeChannels::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(YoutubeChannels::LastCheckedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_youtube_channels_channel_id")
                    .table(YoutubeChannels::Table)
                    .col(YoutubeChannels::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(YoutubeVideos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(YoutubeVideos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(YoutubeVideos::VideoId).string().not_null())
                    .col(ColumnDef::new(YoutubeVideos::ChannelId).string().not_null())
                    .col(ColumnDef::new(YoutubeVideos::ChannelTitle).string().not_null())
                    .col(ColumnDef::new(YoutubeVideos::Title).string().not_null())
                    .col(ColumnDef::new(YoutubeVideos::Description).text().not_null())
                    .col(
                        ColumnDef::new(YoutubeVideos::PublishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(YoutubeVideos::RelevanceScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(YoutubeVideos::IsRelevant)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(YoutubeVideos::PromotedToResearch)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(YoutubeVideos::DiscoveredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_youtube_videos_video_id")
                    .table(YoutubeVideos::Table)
                    .col(YoutubeVideos::VideoId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(YoutubeVideos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YoutubeChannels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum YoutubeChannels {
    Table,
    Id,
    ChannelId,
    Name,
    IsActive,
    LastCheckedAt,
}

#[derive(DeriveIden)]
enum YoutubeVideos {
    Table,
    Id,
    VideoId,
    ChannelId,
    ChannelTitle,
    Title,
    Description,
    PublishedAt,
    RelevanceScore,
    IsRelevant,
    PromotedToResearch,
    DiscoveredAt,
}
