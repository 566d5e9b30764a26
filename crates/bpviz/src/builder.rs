//! Sequence diagram model construction.
//!
//! [`ModelBuilder`] walks the actions and phases of a blueprint, maps each
//! phase to events and collects the result into a [`SequenceDiagram`].

use log::{debug, warn};

use bpviz_core::{
    blueprint::{Blueprint, BlueprintAction},
    sequence::{SequenceAction, SequenceDiagram, SequencePhase},
};

use crate::{
    config::{ActionOrder, DiagramLabels, TranslationConfig, UnsupportedPolicy},
    error::TranslateError,
    mapper::PhaseMapper,
    registry::FunctionRegistry,
};

/// Builds a [`SequenceDiagram`] from a [`Blueprint`].
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    mapper: PhaseMapper<'a>,
    labels: &'a DiagramLabels,
    translation: TranslationConfig,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder with the default translation options.
    pub fn new(registry: &'a FunctionRegistry, labels: &'a DiagramLabels) -> Self {
        Self {
            mapper: PhaseMapper::new(registry, labels),
            labels,
            translation: TranslationConfig::default(),
        }
    }

    pub fn with_translation(mut self, translation: TranslationConfig) -> Self {
        self.translation = translation;
        self
    }

    /// Builds the diagram model.
    ///
    /// Each action becomes a [`SequenceAction`] titled with its name, and each
    /// phase a [`SequencePhase`] described as `phase <name>`.
    ///
    /// # Errors
    ///
    /// Returns the first [`TranslateError`] raised by a phase. An unsupported
    /// function is skipped instead when the policy is
    /// [`UnsupportedPolicy::Skip`].
    pub fn build(&self, blueprint: &Blueprint) -> Result<SequenceDiagram, TranslateError> {
        let mut diagram = SequenceDiagram::new(self.labels.user(), self.labels.orchestrator());

        for (name, action) in self.ordered_actions(blueprint) {
            debug!(action = name, phases = action.phases().len(); "Translating action");
            let mut sequence_action = SequenceAction::new(name);

            for phase in action.phases() {
                let mut sequence_phase = SequencePhase::new(format!("phase {}", phase.name()));

                match self.mapper.map_phase(phase) {
                    Ok(events) => sequence_phase.extend_events(events),
                    Err(TranslateError::UnsupportedFunction { function })
                        if self.translation.unsupported() == UnsupportedPolicy::Skip =>
                    {
                        warn!(
                            action = name,
                            phase = phase.name(),
                            function = function.as_str();
                            "Skipping phase with unsupported function"
                        );
                    }
                    Err(err) => return Err(err),
                }

                sequence_action.push_phase(sequence_phase);
            }

            diagram.push_action(sequence_action);
        }

        Ok(diagram)
    }

    fn ordered_actions<'b>(&self, blueprint: &'b Blueprint) -> Vec<(&'b str, &'b BlueprintAction)> {
        let mut actions: Vec<_> = blueprint
            .actions()
            .iter()
            .map(|(name, action)| (name.as_str(), action))
            .collect();

        if self.translation.action_order() == ActionOrder::Lexicographic {
            actions.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use bpviz_core::blueprint::BlueprintPhase;

    use super::*;

    fn scale(name: &str, namespace: &str) -> BlueprintPhase {
        BlueprintPhase::new("ScaleWorkload", name)
            .with_arg("namespace", namespace)
            .with_arg("kind", "Deployment")
            .with_arg("name", "app")
            .with_arg("replicas", 0)
    }

    fn blueprint() -> Blueprint {
        Blueprint::new()
            .with_action(
                "restore",
                BlueprintAction::default().with_phase(scale("bringUp", "ns1")),
            )
            .with_action(
                "backup",
                BlueprintAction::default()
                    .with_phase(scale("shutdown", "ns1"))
                    .with_phase(scale("startup", "ns1")),
            )
    }

    fn build(blueprint: &Blueprint, translation: TranslationConfig) -> Result<SequenceDiagram, TranslateError> {
        let registry = FunctionRegistry::kanister();
        let labels = DiagramLabels::default();
        ModelBuilder::new(&registry, &labels)
            .with_translation(translation)
            .build(blueprint)
    }

    fn titles(diagram: &SequenceDiagram) -> Vec<&str> {
        diagram.actions().iter().map(SequenceAction::title).collect()
    }

    #[test]
    fn test_build_structure() {
        let diagram = build(&blueprint(), TranslationConfig::default()).expect("Failed to build");

        assert_eq!(diagram.actors(), ["User"]);
        assert_eq!(diagram.participants(), ["Kanister"]);
        assert_eq!(titles(&diagram), vec!["restore", "backup"]);

        let backup = &diagram.actions()[1];
        let descriptions: Vec<_> = backup.phases().iter().map(SequencePhase::description).collect();
        assert_eq!(descriptions, vec!["phase shutdown", "phase startup"]);
        assert!(backup.phases().iter().all(|phase| phase.events().len() == 2));
    }

    #[test]
    fn test_lexicographic_order() {
        let translation = TranslationConfig::new(ActionOrder::Lexicographic, UnsupportedPolicy::Fail);
        let diagram = build(&blueprint(), translation).expect("Failed to build");
        assert_eq!(titles(&diagram), vec!["backup", "restore"]);
    }

    #[test]
    fn test_repeated_participants_are_not_deduplicated() {
        let diagram = build(&blueprint(), TranslationConfig::default()).expect("Failed to build");
        let backup = &diagram.actions()[1];

        let targets: Vec<_> = backup
            .phases()
            .iter()
            .flat_map(SequencePhase::events)
            .filter(|event| event.creates_participant())
            .map(|event| event.to())
            .collect();
        assert_eq!(targets, vec!["ns1/Deployment/app", "ns1/Deployment/app"]);
        assert_eq!(diagram.participants(), ["Kanister"]);
        assert_eq!(
            diagram.introduced_participants(),
            vec!["Kanister", "ns1/Deployment/app"]
        );
    }

    #[test]
    fn test_unsupported_function_fails_fast() {
        let blueprint = Blueprint::new().with_action(
            "backup",
            BlueprintAction::default()
                .with_phase(BlueprintPhase::new("KubeOps", "apply"))
                .with_phase(scale("shutdown", "ns1")),
        );

        let result = build(&blueprint, TranslationConfig::default());
        assert_eq!(result, Err(TranslateError::unsupported("KubeOps")));
    }

    #[test]
    fn test_unsupported_function_skipped_by_policy() {
        let blueprint = Blueprint::new().with_action(
            "backup",
            BlueprintAction::default()
                .with_phase(BlueprintPhase::new("KubeOps", "apply"))
                .with_phase(scale("shutdown", "ns1")),
        );
        let translation = TranslationConfig::new(ActionOrder::Declared, UnsupportedPolicy::Skip);

        let diagram = build(&blueprint, translation).expect("Failed to build");
        let phases = diagram.actions()[0].phases();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].description(), "phase apply");
        assert!(phases[0].events().is_empty());
        assert_eq!(phases[1].events().len(), 2);
    }

    #[test]
    fn test_invalid_argument_is_fatal_even_when_skipping() {
        let blueprint = Blueprint::new().with_action(
            "backup",
            BlueprintAction::default().with_phase(
                BlueprintPhase::new("KubeTask", "dump").with_arg("namespace", "ns1"),
            ),
        );
        let translation = TranslationConfig::new(ActionOrder::Declared, UnsupportedPolicy::Skip);

        let result = build(&blueprint, translation);
        assert!(matches!(
            result,
            Err(TranslateError::InvalidArgument { ref key, .. }) if key == "image"
        ));
    }

    #[test]
    fn test_empty_blueprint() {
        let diagram = build(&Blueprint::new(), TranslationConfig::default()).expect("Failed to build");
        assert!(diagram.actions().is_empty());
        assert_eq!(diagram.participants(), ["Kanister"]);
    }
}
