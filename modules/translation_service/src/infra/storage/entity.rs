//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Translations table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "translations")]
pub struct Model {
    /// Surrogate key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owner kind tag (part of the unique tuple)
    pub owner_type: String,

    /// Owner id (part of the unique tuple)
    pub owner_id: i64,

    /// Canonical language code (part of the unique tuple)
    pub locale: String,

    /// Field name (part of the unique tuple)
    pub key: String,

    /// Translated text
    #[sea_orm(column_type = "Text", nullable)]
    pub value: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Supported languages reference table
pub mod language {
    use sea_orm::entity::prelude::*;

    /// Supported language table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "supported_languages")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Language code (unique)
        #[sea_orm(unique)]
        pub code: String,

        pub name: String,

        pub native_name: String,

        /// "ltr" or "rtl"
        pub direction: String,

        pub is_active: bool,

        pub is_default: bool,

        /// Kurdish fallback-group membership
        pub is_fallback: bool,

        pub sort_order: i32,

        /// Alternative codes as a JSON array of strings
        pub aliases: Json,

        /// Creation timestamp
        pub created_at: DateTimeUtc,

        /// Last update timestamp
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
