//! Domain layer - business logic and services

pub mod events;
pub mod export;
pub mod import;
pub mod languages;
pub mod locale;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod validation;

pub use events::{EventPublisher, LoggingEventPublisher, NoOpEventPublisher, TranslationEvent};
pub use languages::LanguageRegistry;
pub use repository::{EntryWriteError, LanguageRepository, TranslationRepository};
pub use resolver::{resolve, resolve_value, Translatable, TranslatedView, WithTranslations};
pub use service::Service;
pub use validation::BatchLimits;
