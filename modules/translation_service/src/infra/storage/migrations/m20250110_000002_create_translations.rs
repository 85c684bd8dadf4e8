use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Translations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Translations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Translations::OwnerType).string().not_null())
                    .col(ColumnDef::new(Translations::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Translations::Locale).string_len(10).not_null())
                    .col(ColumnDef::new(Translations::Key).string_len(100).not_null())
                    .col(ColumnDef::new(Translations::Value).text().null())
                    .col(
                        ColumnDef::new(Translations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Translations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (owner, locale, key)
        manager
            .create_index(
                Index::create()
                    .name("idx_unique_translation")
                    .table(Translations::Table)
                    .col(Translations::OwnerType)
                    .col(Translations::OwnerId)
                    .col(Translations::Locale)
                    .col(Translations::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_owner")
                    .table(Translations::Table)
                    .col(Translations::OwnerType)
                    .col(Translations::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_locale_key")
                    .table(Translations::Table)
                    .col(Translations::Locale)
                    .col(Translations::Key)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Translations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Translations {
    Table,
    Id,
    OwnerType,
    OwnerId,
    Locale,
    Key,
    Value,
    CreatedAt,
    UpdatedAt,
}
