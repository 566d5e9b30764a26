//! bpviz - Translate workflow blueprints into sequence diagrams.
//!
//! A blueprint describes named actions made of phases that invoke workflow
//! functions. bpviz maps every phase to diagram events, assembles a
//! [`SequenceDiagram`] model and exports it as Mermaid markup. It describes
//! what running the blueprint would look like; it never runs it.

pub mod builder;
pub mod config;
pub mod export;
pub mod mapper;
pub mod registry;
pub mod template;

mod error;

pub use bpviz_core::{blueprint, sequence};

pub use error::{BpvizError, TranslateError};

use log::{debug, info, trace};

use bpviz_core::{blueprint::Blueprint, sequence::SequenceDiagram};

use builder::ModelBuilder;
use config::AppConfig;
use registry::FunctionRegistry;

/// Entry point for translating blueprints.
///
/// Holds the configuration and the function registry derived from it. A
/// translator keeps no state between calls and can be reused.
///
/// # Examples
///
/// ```rust
/// use bpviz::{Translator, blueprint::{Blueprint, BlueprintAction, BlueprintPhase}};
///
/// let blueprint = Blueprint::new().with_action(
///     "backup",
///     BlueprintAction::default().with_phase(
///         BlueprintPhase::new("ScaleWorkload", "shutdownPod")
///             .with_arg("namespace", "ns1")
///             .with_arg("kind", "Deployment")
///             .with_arg("name", "app")
///             .with_arg("replicas", 0),
///     ),
/// );
///
/// let translator = Translator::default();
/// let mermaid = translator.translate(&blueprint)
///     .expect("Failed to translate");
/// assert!(mermaid.contains("create participant ns1/Deployment/app"));
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    config: AppConfig,
    registry: FunctionRegistry,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Translator {
    /// Create a new translator with the given configuration.
    ///
    /// The function registry holds the built-in kinds plus the kinds listed
    /// in the configuration.
    pub fn new(config: AppConfig) -> Self {
        let registry = config.registry();
        Self { config, registry }
    }

    /// Replace the function registry.
    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Build the sequence diagram model for a blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`BpvizError::Translate`] for the first phase that uses an
    /// unsupported function or carries an invalid argument.
    pub fn build(&self, blueprint: &Blueprint) -> Result<SequenceDiagram, BpvizError> {
        info!(
            blueprint = blueprint.name().unwrap_or("<unnamed>"),
            actions = blueprint.actions().len();
            "Building sequence model"
        );

        let diagram = ModelBuilder::new(&self.registry, self.config.labels())
            .with_translation(self.config.translation())
            .build(blueprint)?;

        debug!(
            participants = diagram.introduced_participants().len();
            "Sequence model built successfully"
        );
        trace!(diagram:?; "Built sequence model");

        Ok(diagram)
    }

    /// Render a sequence diagram model as Mermaid markup.
    pub fn render_mermaid(&self, diagram: &SequenceDiagram) -> String {
        let mermaid = export::mermaid::render(diagram);
        debug!(bytes = mermaid.len(); "Mermaid rendered");
        mermaid
    }

    /// Build and render in one step.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Translator::build`]; nothing is rendered on failure.
    pub fn translate(&self, blueprint: &Blueprint) -> Result<String, BpvizError> {
        let diagram = self.build(blueprint)?;
        Ok(self.render_mermaid(&diagram))
    }
}
