//! Multilingual columns in bulk-import rows
//!
//! Spreadsheet rows carry translations in suffixed columns such as `name_ckb`,
//! `Name_sorani` or `storeName_ar`. These helpers turn a row into writer
//! entries and build the matching template headers.

use super::languages::LanguageRegistry;
use crate::contract::{OwnerKind, TranslationEntry};
use std::collections::HashMap;

/// Extra column prefixes accepted for common fields
fn field_variations(field: &str) -> &'static [&'static str] {
    match field {
        "name" => &[
            "storeName",
            "itemName",
            "categoryName",
            "brandName",
            "StoreName",
            "ItemName",
            "CategoryName",
            "BrandName",
        ],
        "address" => &["Address", "location", "Location", "ADDRESS", "LOCATION"],
        "description" => &["Description", "details", "Details", "DESCRIPTION", "DETAILS"],
        "title" => &["Title", "campaignTitle", "CampaignTitle", "TITLE"],
        _ => &[],
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Column names that may hold `field` in the language written as `alias`
fn candidate_columns(field: &str, alias: &str) -> Vec<String> {
    let mut columns = vec![
        format!("{}_{}", field, alias),
        format!("{}_{}", capitalize(field), alias),
    ];
    columns.extend(
        field_variations(field)
            .iter()
            .map(|prefix| format!("{}_{}", prefix, alias)),
    );
    columns
}

/// Extract translation entries from one import row
///
/// For every translatable field and every active non-default language the
/// first non-blank matching column wins. Entries carry the language's
/// canonical code.
pub fn extract_entries(
    kind: OwnerKind,
    row: &HashMap<String, String>,
    registry: &LanguageRegistry,
) -> Vec<TranslationEntry> {
    let mut entries = Vec::new();

    for field in kind.translatable_fields() {
        for language in registry.translated() {
            let found = registry.aliases_of(language).into_iter().find_map(|alias| {
                candidate_columns(field, alias).into_iter().find_map(|column| {
                    row.get(&column)
                        .map(|value| value.trim())
                        .filter(|value| !value.is_empty())
                })
            });

            if let Some(value) = found {
                entries.push(TranslationEntry::new(language.code.clone(), *field, value));
            }
        }
    }

    entries
}

/// Template headers: the base headers followed by `{field}_{code}` columns
pub fn multilingual_headers(
    kind: OwnerKind,
    base_headers: &[&str],
    registry: &LanguageRegistry,
) -> Vec<String> {
    let mut headers: Vec<String> = base_headers.iter().map(|h| h.to_string()).collect();
    for field in kind.translatable_fields() {
        for language in registry.translated() {
            headers.push(format!("{}_{}", field, language.code));
        }
    }
    headers
}

/// Whether any header is a multilingual column for `kind`
pub fn has_multilingual_columns(
    headers: &[&str],
    kind: OwnerKind,
    registry: &LanguageRegistry,
) -> bool {
    kind.translatable_fields().iter().any(|field| {
        registry.translated().any(|language| {
            registry.aliases_of(language).into_iter().any(|alias| {
                candidate_columns(field, alias)
                    .iter()
                    .any(|column| headers.contains(&column.as_str()))
            })
        })
    })
}
