//! Multilingual columns for list exports

use super::languages::LanguageRegistry;
use super::resolver::resolve_value;
use crate::contract::{OwnerKind, Translation};
use std::collections::BTreeMap;

/// Export columns `{field}_{code}` for every translatable field and every
/// active non-default language
///
/// Values go through the resolver, so a Kurdish column is filled from any
/// group alias. Missing translations export as `None`.
pub fn export_columns(
    kind: OwnerKind,
    translations: &[Translation],
    registry: &LanguageRegistry,
) -> BTreeMap<String, Option<String>> {
    let mut columns = BTreeMap::new();
    for field in kind.translatable_fields() {
        for language in registry.translated() {
            let value = resolve_value(translations, field, &language.code).map(str::to_string);
            columns.insert(format!("{}_{}", field, language.code), value);
        }
    }
    columns
}
