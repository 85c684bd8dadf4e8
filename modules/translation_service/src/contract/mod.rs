//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::TranslationApi;
pub use error::TranslationError;
pub use model::{
    BatchOutcome, OwnerKind, OwnerRef, SupportedLanguage, TextDirection, Translation,
    TranslationEntry, DEFAULT_LOCALE,
};
