//! Contract error types for translation service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Translation service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    /// Language or owner not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (language, owner)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Conflict (duplicate language code, etc.)
    #[error("Conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Malformed input rejected before any storage access
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },
    /// Locale is not an active supported language
    #[error("Unsupported locale: {locale}")]
    UnsupportedLocale {
        /// Locale as submitted
        locale: String,
    },
    /// A batch write was aborted and rolled back
    #[error("Batch aborted at {key}/{locale}: {reason}")]
    BatchFailed {
        /// Key of the entry that failed
        key: String,
        /// Locale of the entry that failed
        locale: String,
        /// Storage error details
        reason: String,
    },
    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl TranslationError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
