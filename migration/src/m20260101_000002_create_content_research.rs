use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentResearch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentResearch::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentResearch::Title).string().not_null())
                    .col(ColumnDef::new(ContentResearch::Source).string().not_null())
                    .col(ColumnDef::new(ContentResearch::Summary).text().not_null())
                    .col(ColumnDef::new(ContentResearch::Keywords).json().not_null())
                    .col(
                        ColumnDef::new(ContentResearch::RelevanceScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ContentResearch::Url).string().not_null())
                    .col(ColumnDef::new(ContentResearch::ContentType).string().not_null())
                    .col(
                        ColumnDef::new(ContentResearch::ResearchedAt)
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
                    .name("idx_content_research_url")
                    .table(ContentResearch::Table)
                    .col(ContentResearch::Url)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentResearch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContentResearch {
    Table,
    Id,
    Title,
    Source,
    Summary,
    Keywords,
    RelevanceScore,
    Url,
    ContentType,
    ResearchedAt,
}
