//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{OwnerKind, OwnerRef, SupportedLanguage, TextDirection, Translation};
use anyhow::anyhow;

// ===== Translation Conversions =====

impl TryFrom<entity::Model> for Translation {
    type Error = anyhow::Error;

    fn try_from(entity: entity::Model) -> Result<Self, Self::Error> {
        let kind = OwnerKind::from_tag(&entity.owner_type).ok_or_else(|| {
            anyhow!(
                "translation {} has unknown owner_type '{}'",
                entity.id,
                entity.owner_type
            )
        })?;

        Ok(Self {
            id: entity.id,
            owner: OwnerRef::new(kind, entity.owner_id),
            locale: entity.locale,
            key: entity.key,
            value: entity.value,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first unreadable one
pub fn translations_from(rows: Vec<entity::Model>) -> anyhow::Result<Vec<Translation>> {
    rows.into_iter().map(Translation::try_from).collect()
}

// ===== Language Conversions =====

impl TryFrom<entity::language::Model> for SupportedLanguage {
    type Error = anyhow::Error;

    fn try_from(entity: entity::language::Model) -> Result<Self, Self::Error> {
        let direction = TextDirection::parse(&entity.direction).ok_or_else(|| {
            anyhow!(
                "language '{}' has invalid direction '{}'",
                entity.code,
                entity.direction
            )
        })?;
        let aliases: Vec<String> = serde_json::from_value(entity.aliases)?;

        Ok(Self {
            code: entity.code,
            name: entity.name,
            native_name: entity.native_name,
            direction,
            is_active: entity.is_active,
            is_default: entity.is_default,
            is_fallback: entity.is_fallback,
            sort_order: entity.sort_order,
            aliases,
        })
    }
}

impl From<&SupportedLanguage> for entity::language::ActiveModel {
    fn from(model: &SupportedLanguage) -> Self {
        use sea_orm::ActiveValue::*;

        let now = chrono::Utc::now();
        Self {
            id: NotSet,
            code: Set(model.code.clone()),
            name: Set(model.name.clone()),
            native_name: Set(model.native_name.clone()),
            direction: Set(model.direction.as_str().to_string()),
            is_active: Set(model.is_active),
            is_default: Set(model.is_default),
            is_fallback: Set(model.is_fallback),
            sort_order: Set(model.sort_order),
            aliases: Set(serde_json::Value::from(model.aliases.clone())),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn language_row(direction: &str, aliases: serde_json::Value) -> entity::language::Model {
        entity::language::Model {
            id: 3,
            code: "ckb".into(),
            name: "Kurdish Sorani".into(),
            native_name: "کوردی سۆرانی".into(),
            direction: direction.into(),
            is_active: true,
            is_default: false,
            is_fallback: true,
            sort_order: 3,
            aliases,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn translation_rows_need_a_known_owner_type() {
        let row = entity::Model {
            id: 1,
            owner_type: "store".into(),
            owner_id: 12,
            locale: "ckb".into(),
            key: "name".into(),
            value: Some("Z".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let translation = Translation::try_from(row.clone()).unwrap();
        assert_eq!(translation.owner, OwnerRef::new(OwnerKind::Store, 12));

        let foreign = entity::Model {
            owner_type: "App\\Models\\Store".into(),
            ..row
        };
        assert!(Translation::try_from(foreign).is_err());
    }

    #[test]
    fn language_rows_decode_aliases_and_direction() {
        let language =
            SupportedLanguage::try_from(language_row("rtl", json!(["kurdish", "sorani"]))).unwrap();
        assert_eq!(language.direction, TextDirection::Rtl);
        assert_eq!(language.aliases, vec!["kurdish", "sorani"]);

        assert!(SupportedLanguage::try_from(language_row("up", json!([]))).is_err());
        assert!(SupportedLanguage::try_from(language_row("ltr", json!({"a": 1}))).is_err());
    }
}
