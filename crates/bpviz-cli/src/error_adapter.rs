//! Error adapter for converting BpvizError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Source Snippets
//!
//! A [`BpvizError::Blueprint`] keeps the document text and the failure
//! offset, so it is rendered with a labeled snippet of the blueprint. Every
//! other variant is rendered as a plain error with a code and optional help.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use bpviz::{BpvizError, TranslateError};

/// Adapter for a blueprint that could not be decoded.
pub struct BlueprintAdapter<'a> {
    message: &'a str,
    /// Source text for displaying snippets
    src: &'a str,
    offset: Option<usize>,
}

impl<'a> BlueprintAdapter<'a> {
    /// Create a new blueprint adapter.
    pub fn new(message: &'a str, src: &'a str, offset: Option<usize>) -> Self {
        Self {
            message,
            src,
            offset,
        }
    }

    fn span(&self) -> Option<SourceSpan> {
        let offset = self.offset?.min(self.src.len());
        Some(SourceSpan::new(offset.into(), 0))
    }
}

impl fmt::Debug for BlueprintAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlueprintAdapter")
            .field("message", &self.message)
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for BlueprintAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid blueprint: {}", self.message)
    }
}

impl std::error::Error for BlueprintAdapter<'_> {}

impl MietteDiagnostic for BlueprintAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("bpviz::blueprint"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a blueprint needs an `actions` map whose phases name a `func`",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for [`BpvizError`] variants without source information.
///
/// This covers I/O, configuration and translation errors.
pub struct ErrorAdapter<'a>(pub &'a BpvizError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BpvizError::Io(_) => "bpviz::io",
            BpvizError::Blueprint { .. } => "bpviz::blueprint",
            BpvizError::Config(_) => "bpviz::config",
            BpvizError::Translate(TranslateError::UnsupportedFunction { .. }) => {
                "bpviz::unsupported_function"
            }
            BpvizError::Translate(TranslateError::InvalidArgument { .. }) => {
                "bpviz::invalid_argument"
            }
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BpvizError::Translate(TranslateError::UnsupportedFunction { .. }) => {
                "run with --list-functions to see the supported functions, \
                 or declare the function under [[functions]] in the configuration"
            }
            BpvizError::Translate(TranslateError::InvalidArgument { .. }) => {
                "participant arguments must be strings and note arguments must be scalars"
            }
            BpvizError::Config(_) => "configuration files are TOML, see --config",
            BpvizError::Io(_) | BpvizError::Blueprint { .. } => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a blueprint diagnostic or a plain error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A blueprint decoding failure with source location information.
    Blueprint(BlueprintAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Blueprint(b) => fmt::Display::fmt(b, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Blueprint(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Blueprint(b) => b.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Blueprint(b) => b.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Blueprint(b) => b.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Blueprint(b) => b.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`BpvizError`] into a reportable error.
pub fn to_reportable(err: &BpvizError) -> Reportable<'_> {
    match err {
        BpvizError::Blueprint {
            message,
            src,
            offset,
        } => Reportable::Blueprint(BlueprintAdapter::new(message, src, *offset)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
