use super::*;
use crate::contract::{SupportedLanguage, TextDirection};
use crate::infra::storage::entity::language;
use sea_orm::ActiveModelTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Languages every installation starts with
fn seed_languages() -> Vec<SupportedLanguage> {
    let mut en = SupportedLanguage::new("en", "English");
    en.is_default = true;
    en.sort_order = 1;
    en.aliases = vec!["eng".into(), "english".into()];

    let mut ar = SupportedLanguage::new("ar", "Arabic");
    ar.native_name = "العربية".into();
    ar.direction = TextDirection::Rtl;
    ar.sort_order = 2;
    ar.aliases = vec!["ara".into(), "arabic".into(), "ar_IQ".into()];

    let mut ckb = SupportedLanguage::new("ckb", "Kurdish Sorani");
    ckb.native_name = "کوردی سۆرانی".into();
    ckb.direction = TextDirection::Rtl;
    ckb.is_fallback = true;
    ckb.sort_order = 3;
    ckb.aliases = vec!["kurdish".into(), "sorani".into(), "ckb_IQ".into()];

    vec![en, ar, ckb]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SupportedLanguages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupportedLanguages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SupportedLanguages::Name).string().not_null())
                    .col(
                        ColumnDef::new(SupportedLanguages::NativeName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::Direction)
                            .string_len(3)
                            .not_null()
                            .default("ltr"),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::IsFallback)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SupportedLanguages::Aliases).json().not_null())
                    .col(
                        ColumnDef::new(SupportedLanguages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SupportedLanguages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        for seed in seed_languages() {
            let row: language::ActiveModel = (&seed).into();
            row.insert(db).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupportedLanguages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SupportedLanguages {
    Table,
    Id,
    Code,
    Name,
    NativeName,
    Direction,
    IsActive,
    IsDefault,
    IsFallback,
    SortOrder,
    Aliases,
    CreatedAt,
    UpdatedAt,
}
