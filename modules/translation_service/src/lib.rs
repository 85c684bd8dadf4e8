//! Translation Service Module
//!
//! Polymorphic multilingual store for domain entities. Translations are
//! keyed by owner, locale and field, and resolved with a fallback that
//! treats the Kurdish language codes as one group.

// Public exports
pub mod contract;
pub use contract::{
    client::TranslationApi, error::TranslationError, BatchOutcome, OwnerKind, OwnerRef,
    SupportedLanguage, TextDirection, Translation, TranslationEntry, DEFAULT_LOCALE,
};

pub mod module;
pub use module::TranslationServiceModule;

pub use domain::locale::{is_in_fallback_group, normalize_locale, to_canonical};
pub use domain::resolver::{resolve, Translatable, TranslatedView, WithTranslations};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
