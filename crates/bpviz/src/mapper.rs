//! Phase to event mapping.
//!
//! [`PhaseMapper`] turns one blueprint phase into the diagram events that
//! describe it. Every supported function produces the same pair:
//!
//! ```text
//! create participant <target>
//! <orchestrator>->><target>: <function>
//! note right of <target>: <note>
//! destroy <target>
//! <target>-->><orchestrator>: Done
//! ```
//!
//! The target participant name and the note come from the function's
//! [`FunctionKind`](crate::registry::FunctionKind) templates.

use log::trace;

use bpviz_core::{blueprint::BlueprintPhase, sequence::Event};

use crate::{
    config::DiagramLabels,
    error::TranslateError,
    registry::{FunctionKind, FunctionRegistry},
};

/// Resolves the namespace shown in participant names.
///
/// An absent, empty or unresolved template namespace is replaced by the
/// application namespace label so template syntax never reaches the diagram.
pub fn resolve_namespace<'a>(raw: Option<&'a str>, labels: &'a DiagramLabels) -> &'a str {
    match raw {
        Some(namespace) if !namespace.is_empty() && !labels.is_unresolved(namespace) => namespace,
        _ => labels.app_namespace(),
    }
}

/// Maps phases to events using a function registry.
#[derive(Debug, Clone, Copy)]
pub struct PhaseMapper<'a> {
    registry: &'a FunctionRegistry,
    labels: &'a DiagramLabels,
}

impl<'a> PhaseMapper<'a> {
    pub fn new(registry: &'a FunctionRegistry, labels: &'a DiagramLabels) -> Self {
        Self { registry, labels }
    }

    /// Produces the events for one phase.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::UnsupportedFunction`] if the registry has no
    /// entry for the phase's function, or [`TranslateError::InvalidArgument`]
    /// if an argument used by the templates is missing or of the wrong shape.
    pub fn map_phase(&self, phase: &BlueprintPhase) -> Result<Vec<Event>, TranslateError> {
        let kind = self
            .registry
            .get(phase.func())
            .ok_or_else(|| TranslateError::unsupported(phase.func()))?;

        let namespace = self.namespace(phase, kind)?;

        let participant = kind.participant().render(|key| {
            if key == kind.namespace_arg() {
                return Ok(namespace.to_string());
            }
            phase
                .str_arg(key)
                .map(str::to_string)
                .map_err(|reason| TranslateError::invalid_argument(phase, key, reason))
        })?;

        let note = kind.note().render(|key| {
            if key == kind.namespace_arg() {
                return Ok(namespace.to_string());
            }
            phase
                .scalar_arg(key)
                .map(ToString::to_string)
                .map_err(|reason| TranslateError::invalid_argument(phase, key, reason))
        })?;

        trace!(function = phase.func(), participant = participant.as_str(); "Mapped phase");

        let orchestrator = self.labels.orchestrator();
        Ok(vec![
            Event::call(orchestrator, participant.as_str(), phase.func(), note),
            Event::done(participant, orchestrator),
        ])
    }

    fn namespace<'p>(
        &'p self,
        phase: &'p BlueprintPhase,
        kind: &FunctionKind,
    ) -> Result<&'p str, TranslateError> {
        let raw = phase
            .opt_str_arg(kind.namespace_arg())
            .map_err(|reason| TranslateError::invalid_argument(phase, kind.namespace_arg(), reason))?;
        Ok(resolve_namespace(raw, self.labels))
    }
}
