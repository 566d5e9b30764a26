//! Configuration types for blueprint translation.
//!
//! This module provides configuration structures that control how blueprints
//! are translated into sequence diagrams. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining labels, translation
//!   options and extra function kinds.
//! - [`DiagramLabels`] - Names of the fixed diagram roles and the namespace fallback.
//! - [`TranslationConfig`] - Action ordering and the unsupported-function policy.
//!
//! # Example
//!
//! ```
//! # use bpviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.labels().orchestrator(), "Kanister");
//! assert!(config.registry().get("ScaleWorkload").is_some());
//! ```

use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::registry::{FunctionKind, FunctionRegistry};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram role labels.
    #[serde(default)]
    labels: DiagramLabels,

    /// Translation behavior.
    #[serde(default)]
    translation: TranslationConfig,

    /// Function kinds registered on top of the built-in ones.
    #[serde(default)]
    functions: Vec<FunctionKind>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given labels and translation options.
    ///
    /// # Arguments
    ///
    /// * `labels` - Names of the fixed diagram roles.
    /// * `translation` - Action ordering and unsupported-function policy.
    pub fn new(labels: DiagramLabels, translation: TranslationConfig) -> Self {
        Self {
            labels,
            translation,
            functions: Vec::new(),
        }
    }

    /// Adds a function kind to register on top of the built-in ones.
    pub fn with_function(mut self, kind: FunctionKind) -> Self {
        self.functions.push(kind);
        self
    }

    pub fn labels(&self) -> &DiagramLabels {
        &self.labels
    }

    pub fn translation(&self) -> TranslationConfig {
        self.translation
    }

    /// Returns the extra function kinds.
    pub fn functions(&self) -> &[FunctionKind] {
        &self.functions
    }

    /// Builds the function registry: the Kanister built-ins, then the
    /// configured kinds, which replace built-ins of the same name.
    pub fn registry(&self) -> FunctionRegistry {
        let mut registry = FunctionRegistry::kanister();
        for kind in &self.functions {
            if registry.register(kind.clone()).is_some() {
                debug!(function = kind.name(); "Configured function replaces built-in");
            }
        }
        registry
    }
}

/// Labels for the fixed diagram roles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagramLabels {
    /// The actor that invokes actions.
    user: String,

    /// The participant that runs every phase.
    orchestrator: String,

    /// Stands in for a namespace that is empty or still a template.
    app_namespace: String,

    /// Prefix marking an unresolved template value. Empty disables detection.
    placeholder_prefix: String,
}

impl Default for DiagramLabels {
    fn default() -> Self {
        Self {
            user: "User".to_string(),
            orchestrator: "Kanister".to_string(),
            app_namespace: "App".to_string(),
            placeholder_prefix: "{{".to_string(),
        }
    }
}

impl DiagramLabels {
    /// Creates labels with the given actor and orchestrator names and the
    /// default namespace fallback.
    pub fn new(user: impl Into<String>, orchestrator: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            orchestrator: orchestrator.into(),
            ..Self::default()
        }
    }

    pub fn with_app_namespace(mut self, app_namespace: impl Into<String>) -> Self {
        self.app_namespace = app_namespace.into();
        self
    }

    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn orchestrator(&self) -> &str {
        &self.orchestrator
    }

    pub fn app_namespace(&self) -> &str {
        &self.app_namespace
    }

    pub fn placeholder_prefix(&self) -> &str {
        &self.placeholder_prefix
    }

    /// Returns `true` if `value` is an unresolved template expression.
    pub fn is_unresolved(&self, value: &str) -> bool {
        !self.placeholder_prefix.is_empty() && value.starts_with(&self.placeholder_prefix)
    }
}

/// Order in which blueprint actions are translated.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOrder {
    /// Document declaration order (default)
    #[default]
    Declared,
    /// Sorted by action name
    Lexicographic,
}

impl FromStr for ActionOrder {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "declared" => Ok(Self::Declared),
            "lexicographic" => Ok(Self::Lexicographic),
            _ => Err("Unsupported action order"),
        }
    }
}

/// What to do with a phase whose function has no registry entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Abort the translation (default)
    #[default]
    Fail,
    /// Keep the phase without events and continue
    Skip,
}

impl FromStr for UnsupportedPolicy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            _ => Err("Unsupported policy"),
        }
    }
}

/// Translation behavior options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TranslationConfig {
    #[serde(default)]
    action_order: ActionOrder,

    #[serde(default)]
    unsupported: UnsupportedPolicy,
}

impl TranslationConfig {
    pub fn new(action_order: ActionOrder, unsupported: UnsupportedPolicy) -> Self {
        Self {
            action_order,
            unsupported,
        }
    }

    pub fn action_order(&self) -> ActionOrder {
        self.action_order
    }

    pub fn unsupported(&self) -> UnsupportedPolicy {
        self.unsupported
    }
}
