//! Supported-language registry
//!
//! Snapshot of the `supported_languages` reference data used to validate and
//! canonicalize locales at the application boundary.

use super::locale::is_in_fallback_group;
use crate::contract::{SupportedLanguage, TextDirection};

/// Lookup structure over the supported languages
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    /// Sorted by `sort_order`, then code
    languages: Vec<SupportedLanguage>,
}

impl LanguageRegistry {
    pub fn new(mut languages: Vec<SupportedLanguage>) -> Self {
        languages.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.code.cmp(&b.code))
        });
        Self { languages }
    }

    /// Every language, active or not
    pub fn all(&self) -> &[SupportedLanguage] {
        &self.languages
    }

    /// Active languages in tab order
    pub fn active(&self) -> impl Iterator<Item = &SupportedLanguage> {
        self.languages.iter().filter(|l| l.is_active)
    }

    /// Active languages other than the default one; these get Translation rows
    pub fn translated(&self) -> impl Iterator<Item = &SupportedLanguage> {
        self.active().filter(|l| !l.is_default)
    }

    /// Language the entities' base columns are authored in
    pub fn default_language(&self) -> Option<&SupportedLanguage> {
        self.languages.iter().find(|l| l.is_default)
    }

    /// Language named by `code` through its code or aliases
    ///
    /// Kurdish group members resolve to the fallback-group language even when
    /// the exact alias is not registered.
    pub fn canonicalize(&self, code: &str) -> Option<&SupportedLanguage> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        self.languages
            .iter()
            .find(|l| l.answers_to(code))
            .or_else(|| {
                if is_in_fallback_group(code) {
                    self.languages.iter().find(|l| l.is_fallback)
                } else {
                    None
                }
            })
    }

    /// Whether `code` names an active language
    pub fn is_supported(&self, code: &str) -> bool {
        self.canonicalize(code).is_some_and(|l| l.is_active)
    }

    /// Text direction for `code`, left-to-right when unknown
    pub fn direction(&self, code: &str) -> TextDirection {
        self.canonicalize(code)
            .map(|l| l.direction)
            .unwrap_or_default()
    }

    /// Codes a language may appear under in import columns, code first
    pub fn aliases_of<'a>(&'a self, language: &'a SupportedLanguage) -> Vec<&'a str> {
        let mut aliases = vec![language.code.as_str()];
        aliases.extend(language.aliases.iter().map(String::as_str));
        if language.is_fallback {
            aliases.extend(super::locale::KURDISH_ALIASES.iter().copied());
        }

        let mut seen = Vec::with_capacity(aliases.len());
        aliases.retain(|alias| {
            let lower = alias.to_ascii_lowercase();
            if seen.contains(&lower) {
                false
            } else {
                seen.push(lower);
                true
            }
        });
        aliases
    }
}

#[cfg(test)]
pub(crate) fn seeded() -> LanguageRegistry {
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

    LanguageRegistry::new(vec![ckb, ar, en])
}
