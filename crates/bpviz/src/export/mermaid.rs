//! Mermaid sequence diagram export.
//!
//! The output is one directive per line. The header is flush left and every
//! other line is indented by four spaces:
//!
//! ```text
//! sequenceDiagram
//!     actor User
//!     participant Kanister
//!     User->>Kanister: backup
//!     note right of Kanister: phase shutdownPod
//!     create participant App/Deployment/web
//!     Kanister->>App/Deployment/web: ScaleWorkload
//!     note right of App/Deployment/web: Set the replica count <br> of Deployment/web to 0
//!     destroy App/Deployment/web
//!     App/Deployment/web-->>Kanister: Done
//!     Kanister-->>User: backup completed!
//! ```
//!
//! Text is written as-is; nothing is escaped.

use bpviz_core::sequence::{ArrowStyle, Event, SequenceAction, SequenceDiagram};

const HEADER: &str = "sequenceDiagram";
const INDENT: &str = "    ";

/// Renders a diagram model as Mermaid markup.
///
/// Rendering is deterministic: equal models produce identical text.
pub fn render(diagram: &SequenceDiagram) -> String {
    let mut out = MermaidWriter::default();
    out.line(&[HEADER]);

    for actor in diagram.actors() {
        out.directive(&["actor ", actor.as_str()]);
    }
    for participant in diagram.participants() {
        out.directive(&["participant ", participant.as_str()]);
    }
    for action in diagram.actions() {
        out.action(diagram, action);
    }

    out.finish()
}

#[derive(Default)]
struct MermaidWriter {
    out: String,
}

impl MermaidWriter {
    fn line(&mut self, parts: &[&str]) {
        for part in parts {
            self.out.push_str(part);
        }
        self.out.push('\n');
    }

    fn directive(&mut self, parts: &[&str]) {
        self.out.push_str(INDENT);
        self.line(parts);
    }

    fn arrow(&mut self, from: &str, style: ArrowStyle, to: &str, label: &str) {
        self.directive(&[from, style.glyph(), to, ": ", label]);
    }

    fn note(&mut self, target: &str, text: &str) {
        self.directive(&["note right of ", target, ": ", text]);
    }

    fn action(&mut self, diagram: &SequenceDiagram, action: &SequenceAction) {
        let user = diagram.initiator();
        let orchestrator = diagram.orchestrator();

        self.arrow(user, ArrowStyle::SolidAsync, orchestrator, action.title());
        for phase in action.phases() {
            self.note(orchestrator, phase.description());
            for event in phase.events() {
                self.event(event);
            }
        }
        self.arrow(
            orchestrator,
            ArrowStyle::DashedAsync,
            user,
            &format!("{} completed!", action.title()),
        );
    }

    fn event(&mut self, event: &Event) {
        if event.creates_participant() {
            self.directive(&["create participant ", event.to()]);
        }
        if event.destroys_participant() {
            self.directive(&["destroy ", event.from()]);
        }
        self.arrow(event.from(), event.arrow(), event.to(), event.label());
        if let Some(note) = event.note().filter(|note| !note.is_empty()) {
            self.note(event.to(), note);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use bpviz_core::sequence::SequencePhase;

    use super::*;

    fn scale_action(title: &str, phase_name: &str, target: &str) -> SequenceAction {
        let mut phase = SequencePhase::new(format!("phase {phase_name}"));
        phase.extend_events([
            Event::call(
                "Kanister",
                target,
                "ScaleWorkload",
                "Set the replica count <br> of Deployment/app to 0",
            ),
            Event::done(target, "Kanister"),
        ]);
        let mut action = SequenceAction::new(title);
        action.push_phase(phase);
        action
    }

    #[test]
    fn test_render_empty_diagram() {
        let diagram = SequenceDiagram::new("User", "Kanister");
        assert_eq!(
            render(&diagram),
            "sequenceDiagram\n    actor User\n    participant Kanister\n"
        );
    }

    #[test]
    fn test_render_single_action() {
        let mut diagram = SequenceDiagram::new("User", "Kanister");
        diagram.push_action(scale_action("Backup", "shutdownPod", "ns1/Deployment/app"));

        let expected = "\
sequenceDiagram
    actor User
    participant Kanister
    User->>Kanister: Backup
    note right of Kanister: phase shutdownPod
    create participant ns1/Deployment/app
    Kanister->>ns1/Deployment/app: ScaleWorkload
    note right of ns1/Deployment/app: Set the replica count <br> of Deployment/app to 0
    destroy ns1/Deployment/app
    ns1/Deployment/app-->>Kanister: Done
    Kanister-->>User: Backup completed!
";
        assert_eq!(render(&diagram), expected);
    }

    #[test]
    fn test_render_phase_without_events() {
        let mut diagram = SequenceDiagram::new("User", "Kanister");
        let mut action = SequenceAction::new("delete");
        action.push_phase(SequencePhase::new("phase cleanup"));
        diagram.push_action(action);

        let rendered = render(&diagram);
        assert!(rendered.ends_with(
            "    User->>Kanister: delete\n    note right of Kanister: phase cleanup\n    Kanister-->>User: delete completed!\n"
        ));
    }

    #[test]
    fn test_render_repeats_create_for_repeated_participant() {
        let mut diagram = SequenceDiagram::new("User", "Kanister");
        diagram.push_action(scale_action("backup", "a", "App/Deployment/web"));
        diagram.push_action(scale_action("restore", "b", "App/Deployment/web"));

        let rendered = render(&diagram);
        assert_eq!(
            rendered
                .matches("    create participant App/Deployment/web\n")
                .count(),
            2
        );
        assert_eq!(rendered.matches("    destroy App/Deployment/web\n").count(), 2);
    }

    #[test]
    fn test_render_uses_model_labels() {
        let mut diagram = SequenceDiagram::new("Operator", "Controller");
        diagram.push_action(SequenceAction::new("sync"));

        let rendered = render(&diagram);
        assert!(rendered.contains("    actor Operator\n"));
        assert!(rendered.contains("    Operator->>Controller: sync\n"));
        assert!(rendered.contains("    Controller-->>Operator: sync completed!\n"));
    }

    #[test]
    fn test_every_line_is_newline_terminated() {
        let mut diagram = SequenceDiagram::new("User", "Kanister");
        diagram.push_action(scale_action("Backup", "p", "ns/Deployment/app"));
        let rendered = render(&diagram);

        assert!(rendered.ends_with('\n'));
        for line in rendered.lines().skip(1) {
            assert!(line.starts_with(INDENT), "line not indented: {line:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_render_is_deterministic(
            titles in proptest::collection::vec("[a-zA-Z]{1,12}", 0..5),
            target in "[a-z]{1,8}/[A-Za-z]{1,8}/[a-z]{1,8}",
        ) {
            let mut diagram = SequenceDiagram::new("User", "Kanister");
            for title in &titles {
                diagram.push_action(scale_action(title, "p", &target));
            }

            let first = render(&diagram);
            let second = render(&diagram.clone());
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.matches("completed!").count(), titles.len());
        }
    }
}
