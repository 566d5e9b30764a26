//! Error types for bpviz operations.
//!
//! [`TranslateError`] covers failures of the translation itself and
//! [`BpvizError`] wraps it together with the I/O, configuration and document
//! decoding failures callers run into around it.
//!
//! # Diagnostic Variants
//!
//! The `Blueprint` variant keeps the document text and the failure offset so
//! front ends can point at the offending location.

use std::io;

use thiserror::Error;

use bpviz_core::blueprint::{ArgumentError, BlueprintPhase};

/// A blueprint that cannot be translated.
///
/// Translation is deterministic, so retrying with the same blueprint always
/// reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("unsupported function `{function}`")]
    UnsupportedFunction { function: String },

    #[error("invalid argument `{key}` for function `{function}` in phase `{phase}`: {reason}")]
    InvalidArgument {
        phase: String,
        function: String,
        key: String,
        reason: ArgumentError,
    },
}

impl TranslateError {
    /// Create an `UnsupportedFunction` error for the given function identifier.
    pub fn unsupported(function: impl Into<String>) -> Self {
        Self::UnsupportedFunction {
            function: function.into(),
        }
    }

    /// Create an `InvalidArgument` error for an argument of `phase`.
    pub fn invalid_argument(phase: &BlueprintPhase, key: &str, reason: ArgumentError) -> Self {
        Self::InvalidArgument {
            phase: phase.name().to_string(),
            function: phase.func().to_string(),
            key: key.to_string(),
            reason,
        }
    }
}

/// The main error type for bpviz operations.
#[derive(Debug, Error)]
pub enum BpvizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Blueprint error: {message}")]
    Blueprint {
        message: String,
        src: String,
        offset: Option<usize>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl BpvizError {
    /// Create a new `Blueprint` error for a document that could not be decoded.
    ///
    /// # Arguments
    ///
    /// * `message` - Decoder error message.
    /// * `src` - The document text.
    /// * `offset` - Byte offset of the failure in `src`, when known.
    pub fn new_blueprint_error(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: Option<usize>,
    ) -> Self {
        Self::Blueprint {
            message: message.into(),
            src: src.into(),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = TranslateError::unsupported("KubeOps");
        assert_eq!(err.to_string(), "unsupported function `KubeOps`");
    }

    #[test]
    fn test_invalid_argument_names_phase_function_and_key() {
        let phase = BlueprintPhase::new("ScaleWorkload", "shutdownPod");
        let err = TranslateError::invalid_argument(
            &phase,
            "replicas",
            ArgumentError::WrongType {
                expected: "scalar",
                found: "list",
            },
        );
        assert_eq!(
            err.to_string(),
            "invalid argument `replicas` for function `ScaleWorkload` in phase `shutdownPod`: expected scalar, found list"
        );
    }

    #[test]
    fn test_translate_error_is_transparent() {
        let err = BpvizError::from(TranslateError::unsupported("Wait"));
        assert_eq!(err.to_string(), "unsupported function `Wait`");
    }
}
