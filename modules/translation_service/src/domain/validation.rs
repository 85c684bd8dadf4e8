//! Input validation for translation batches and language registration
//!
//! Everything here runs before storage is touched, so a rejected batch leaves
//! no trace in the database.

use super::languages::LanguageRegistry;
use super::locale::{is_in_fallback_group, CANONICAL_KURDISH};
use crate::contract::{OwnerRef, SupportedLanguage, TranslationEntry, TranslationError, DEFAULT_LOCALE};
use std::collections::HashMap;

/// Width of the `locale` column
pub const MAX_LOCALE_LEN: usize = 10;
/// Width of the `key` column
pub const MAX_KEY_LEN: usize = 100;

/// Limits applied to every submitted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    pub max_batch_size: usize,
    pub max_value_size: usize,
    /// Reject locales that are not active supported languages
    pub strict_locales: bool,
}

/// Validate the owner reference
pub fn validate_owner(owner: OwnerRef) -> Result<(), TranslationError> {
    if owner.id <= 0 {
        return Err(TranslationError::validation(format!(
            "owner id must be positive, got {} for {}",
            owner.id, owner.kind
        )));
    }
    Ok(())
}

/// Canonical storage form of a translation locale
///
/// Kurdish group members become `ckb`, registered aliases become their
/// language code, anything else is lower-cased.
pub fn canonical_locale(locale: &str, registry: &LanguageRegistry) -> String {
    let locale = locale.trim();
    if is_in_fallback_group(locale) {
        return CANONICAL_KURDISH.to_string();
    }
    registry
        .canonicalize(locale)
        .map(|l| l.code.to_ascii_lowercase())
        .unwrap_or_else(|| locale.to_ascii_lowercase())
}

/// Validate and normalize a batch
///
/// Returns the entries to write with canonical locales and trimmed keys. A
/// later entry for the same (locale, key) replaces the earlier value while
/// keeping the earlier position.
pub fn prepare_batch(
    owner: OwnerRef,
    entries: Vec<TranslationEntry>,
    registry: &LanguageRegistry,
    limits: &BatchLimits,
    accepts_default: bool,
) -> Result<Vec<TranslationEntry>, TranslationError> {
    validate_owner(owner)?;

    if entries.len() > limits.max_batch_size {
        return Err(TranslationError::validation(format!(
            "batch of {} entries exceeds the limit of {}",
            entries.len(),
            limits.max_batch_size
        )));
    }

    let mut prepared: Vec<TranslationEntry> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let key = entry.key.trim();
        if key.is_empty() {
            return Err(TranslationError::validation(format!(
                "entry #{} for {} has an empty key",
                index, owner
            )));
        }
        if key.len() > MAX_KEY_LEN {
            return Err(TranslationError::validation(format!(
                "entry #{} key exceeds {} characters",
                index, MAX_KEY_LEN
            )));
        }
        if !owner.kind.is_translatable(key) {
            return Err(TranslationError::validation(format!(
                "'{}' is not a translatable field of {} (expected one of: {})",
                key,
                owner.kind,
                owner.kind.translatable_fields().join(", ")
            )));
        }
        if entry.value.len() > limits.max_value_size {
            return Err(TranslationError::validation(format!(
                "value for {}/{} is {} bytes, limit is {}",
                key,
                entry.locale,
                entry.value.len(),
                limits.max_value_size
            )));
        }

        let locale = if entry.is_default() {
            if !accepts_default {
                return Err(TranslationError::validation(format!(
                    "no default column writer is registered for {}",
                    owner.kind
                )));
            }
            DEFAULT_LOCALE.to_string()
        } else {
            validate_locale(&entry.locale, registry, limits)?
        };

        let slot = (locale.clone(), key.to_string());
        match positions.get(&slot) {
            Some(&position) => prepared[position].value = entry.value,
            None => {
                positions.insert(slot, prepared.len());
                prepared.push(TranslationEntry::new(locale, key, entry.value));
            }
        }
    }

    Ok(prepared)
}

fn validate_locale(
    locale: &str,
    registry: &LanguageRegistry,
    limits: &BatchLimits,
) -> Result<String, TranslationError> {
    if locale.trim().is_empty() {
        return Err(TranslationError::validation("locale cannot be empty"));
    }

    let canonical = canonical_locale(locale, registry);
    if canonical.len() > MAX_LOCALE_LEN {
        return Err(TranslationError::validation(format!(
            "locale '{}' exceeds {} characters",
            locale, MAX_LOCALE_LEN
        )));
    }
    if limits.strict_locales && !registry.is_supported(&canonical) {
        return Err(TranslationError::UnsupportedLocale {
            locale: locale.to_string(),
        });
    }
    Ok(canonical)
}

/// Validate a language before registration
pub fn validate_language(language: &SupportedLanguage) -> Result<(), TranslationError> {
    let code = language.code.as_str();
    if code.is_empty() || code.len() > MAX_LOCALE_LEN {
        return Err(TranslationError::validation(format!(
            "language code must be 1..={} characters",
            MAX_LOCALE_LEN
        )));
    }
    if code.eq_ignore_ascii_case(DEFAULT_LOCALE) {
        return Err(TranslationError::validation(
            "'default' is reserved for base-column writes",
        ));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TranslationError::validation(format!(
            "language code '{}' may only contain ASCII letters, digits, '-' and '_'",
            code
        )));
    }
    if language.name.trim().is_empty() {
        return Err(TranslationError::validation("language name cannot be empty"));
    }
    Ok(())
}
