use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AutomationJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AutomationJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AutomationJobs::JobType).string().not_null())
                    .col(ColumnDef::new(AutomationJobs::Status).string().not_null())
                    .col(
                        ColumnDef::new(AutomationJobs::ScheduledTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AutomationJobs::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(AutomationJobs::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(AutomationJobs::ErrorMessage).text())
                    .col(ColumnDef::new(AutomationJobs::ResultData).json().not_null())
                    .col(
                        ColumnDef::new(AutomationJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Status endpoint reads the latest run per type
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_automation_jobs_type_scheduled")
                    .table(AutomationJobs::Table)
                    .col(AutomationJobs::JobType)
                    .col(AutomationJobs::ScheduledTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AutomationJobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AutomationJobs {
    Table,
    Id,
    JobType,
    Status,
    ScheduledTime,
    StartedAt,
    CompletedAt,
    ErrorMessage,
    ResultData,
    CreatedAt,
}
