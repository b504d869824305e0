use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsletterCampaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsletterCampaigns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsletterCampaigns::Subject).string().not_null())
                    .col(ColumnDef::new(NewsletterCampaigns::Content).text().not_null())
                    .col(ColumnDef::new(NewsletterCampaigns::HtmlContent).text().not_null())
                    .col(
                        ColumnDef::new(NewsletterCampaigns::RecipientCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(NewsletterCampaigns::SuccessCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(NewsletterCampaigns::FailureCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(NewsletterCampaigns::Status).string().not_null())
                    .col(ColumnDef::new(NewsletterCampaigns::Topics).json().not_null())
                    .col(
                        ColumnDef::new(NewsletterCampaigns::IsFallback)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(NewsletterCampaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(NewsletterCampaigns::SentAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsletterCampaigns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NewsletterCampaigns {
    Table,
    Id,
    Subject,
    Content,
    HtmlContent,
    RecipientCount,
    SuccessCount,
    FailureCount,
    Status,
    Topics,
    IsFallback,
    CreatedAt,
    SentAt,
}
