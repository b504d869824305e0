use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormSubmissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FormSubmissions::FormType).string().not_null())
                    .col(ColumnDef::new(FormSubmissions::Name).string().not_null())
                    .col(ColumnDef::new(FormSubmissions::Email).string().not_null())
                    .col(ColumnDef::new(FormSubmissions::Company).string())
                    .col(ColumnDef::new(FormSubmissions::Phone).string())
                    .col(ColumnDef::new(FormSubmissions::Message).text())
                    .col(
                        ColumnDef::new(FormSubmissions::NewsletterOptIn)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(FormSubmissions::Source).string())
                    .col(
                        ColumnDef::new(FormSubmissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Newsletter recipient lookup
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_form_submissions_opt_in_email")
                    .table(FormSubmissions::Table)
                    .col(FormSubmissions::NewsletterOptIn)
                    .col(FormSubmissions::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormSubmissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormSubmissions {
    Table,
    Id,
    FormType,
    Name,
    Email,
    Company,
    Phone,
    Message,
    NewsletterOptIn,
    Source,
    CreatedAt,
}
