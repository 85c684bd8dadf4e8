//! Translation resolution
//!
//! Resolution is a pure function of (loaded translations, key, locale). It never
//! touches storage: callers load an owner's rows explicitly through the service
//! and pair them with the entity in a [`WithTranslations`].

use super::locale::fallback_candidates;
use crate::contract::{OwnerRef, Translation};

/// A domain record that owns translations
///
/// Implementors expose their owner reference and the untranslated value of
/// each translatable field, usually authored in the default language.
pub trait Translatable {
    /// Owner reference used to load this entity's translations
    fn owner(&self) -> OwnerRef;

    /// Raw stored attribute for `key`
    fn default_value(&self, key: &str) -> Option<&str>;
}

/// An entity together with its full, unfiltered translation rows
#[derive(Debug, Clone, PartialEq)]
pub struct WithTranslations<E> {
    entity: E,
    translations: Vec<Translation>,
}

impl<E: Translatable> WithTranslations<E> {
    pub fn new(entity: E, translations: Vec<Translation>) -> Self {
        Self {
            entity,
            translations,
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    pub fn into_inner(self) -> E {
        self.entity
    }

    /// Resolve one field for `locale`
    pub fn resolve(&self, key: &str, locale: &str) -> &str {
        resolve(self, key, locale)
    }

    /// Locale-bound view exposing resolved fields by name
    pub fn view<'a>(&'a self, locale: &'a str) -> TranslatedView<'a, E> {
        TranslatedView {
            source: self,
            locale,
        }
    }
}

/// Best translated value for `key`, or `None` when no usable row matches
///
/// The exact locale wins. For Kurdish group locales the rest of the group is
/// tried in priority order, canonical code first. Rows with a missing or
/// empty value are skipped.
pub fn resolve_value<'a>(translations: &'a [Translation], key: &str, locale: &str) -> Option<&'a str> {
    fallback_candidates(locale).into_iter().find_map(|candidate| {
        translations
            .iter()
            .filter(|t| t.key == key && t.locale.eq_ignore_ascii_case(candidate))
            .find_map(|t| t.value.as_deref().filter(|v| !v.is_empty()))
    })
}

/// Resolve `key` for `locale`, degrading to the entity's default value
///
/// Never fails: with no matching translation and no default the result is "".
pub fn resolve<'a, E: Translatable>(
    entity: &'a WithTranslations<E>,
    key: &str,
    locale: &str,
) -> &'a str {
    resolve_value(&entity.translations, key, locale)
        .or_else(|| entity.entity.default_value(key))
        .unwrap_or_default()
}

/// Resolved fields of one entity for one locale
#[derive(Debug, Clone, Copy)]
pub struct TranslatedView<'a, E> {
    source: &'a WithTranslations<E>,
    locale: &'a str,
}

impl<'a, E: Translatable> TranslatedView<'a, E> {
    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// Resolved value of one field
    pub fn get(&self, key: &str) -> &'a str {
        resolve(self.source, key, self.locale)
    }

    /// Every translatable field of the owner kind with its resolved value
    pub fn fields(&self) -> Vec<(&'static str, &'a str)> {
        self.source
            .entity
            .owner()
            .kind
            .translatable_fields()
            .iter()
            .map(|field| (*field, self.get(field)))
            .collect()
    }
}
