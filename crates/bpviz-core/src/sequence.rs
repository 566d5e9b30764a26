//! Sequence diagram model.
//!
//! The intermediate representation between translation and text export. A
//! [`SequenceDiagram`] holds the actors and declared participants, and the
//! ordered actions, phases and events produced from a blueprint.
//!
//! The model is built once per translation and is not mutated after export.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Arrow glyph used for an event.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowStyle {
    /// Solid line with an open arrowhead, used for calls.
    #[default]
    SolidAsync,
    /// Dashed line with an open arrowhead, used for returns.
    DashedAsync,
}

impl ArrowStyle {
    /// Returns the Mermaid arrow glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::SolidAsync => "->>",
            Self::DashedAsync => "-->>",
        }
    }
}

impl FromStr for ArrowStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid_async" => Ok(Self::SolidAsync),
            "dashed_async" => Ok(Self::DashedAsync),
            _ => Err("Invalid arrow style"),
        }
    }
}

impl fmt::Display for ArrowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Label of the event that closes a call.
pub const DONE_LABEL: &str = "Done";

/// One diagram primitive: an arrow, optionally creating or destroying a
/// participant and optionally annotated with a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    creates_participant: bool,
    destroys_participant: bool,
    from: String,
    to: String,
    label: String,
    note: Option<String>,
    arrow: ArrowStyle,
}

impl Event {
    /// Creates a call event: `from` invokes a newly created participant `to`.
    pub fn call(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        let note = note.into();
        Self {
            creates_participant: true,
            destroys_participant: false,
            from: from.into(),
            to: to.into(),
            label: label.into(),
            note: (!note.is_empty()).then_some(note),
            arrow: ArrowStyle::SolidAsync,
        }
    }

    /// Creates the matching return event: `from` is destroyed and reports
    /// [`DONE_LABEL`] back to `to`.
    pub fn done(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            creates_participant: false,
            destroys_participant: true,
            from: from.into(),
            to: to.into(),
            label: DONE_LABEL.to_string(),
            note: None,
            arrow: ArrowStyle::DashedAsync,
        }
    }

    pub fn creates_participant(&self) -> bool {
        self.creates_participant
    }

    pub fn destroys_participant(&self) -> bool {
        self.destroys_participant
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the annotation, if the event carries a non-empty one.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn arrow(&self) -> ArrowStyle {
        self.arrow
    }
}

/// A phase of an action with the events it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePhase {
    description: String,
    events: Vec<Event>,
}

impl SequencePhase {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            events: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Appends events in order.
    pub fn extend_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }
}

/// An action invoked by the user, made of ordered phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAction {
    title: String,
    phases: Vec<SequencePhase>,
}

impl SequenceAction {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            phases: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phases(&self) -> &[SequencePhase] {
        &self.phases
    }

    pub fn push_phase(&mut self, phase: SequencePhase) {
        self.phases.push(phase);
    }
}

/// The sequence diagram model.
///
/// The first actor is the user who invokes actions and the first participant
/// is the orchestrator that runs them. Both are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDiagram {
    actors: Vec<String>,
    participants: Vec<String>,
    actions: Vec<SequenceAction>,
}

impl SequenceDiagram {
    /// Creates an empty diagram with one actor and the orchestrator participant.
    ///
    /// # Arguments
    ///
    /// * `actor` - Label of the user that invokes actions.
    /// * `orchestrator` - Label of the participant that runs the phases.
    pub fn new(actor: impl Into<String>, orchestrator: impl Into<String>) -> Self {
        Self {
            actors: vec![actor.into()],
            participants: vec![orchestrator.into()],
            actions: Vec::new(),
        }
    }

    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    /// Returns the declared participants, orchestrator first.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn actions(&self) -> &[SequenceAction] {
        &self.actions
    }

    /// Returns the user actor.
    pub fn initiator(&self) -> &str {
        &self.actors[0]
    }

    /// Returns the orchestrator participant.
    pub fn orchestrator(&self) -> &str {
        &self.participants[0]
    }

    pub fn push_action(&mut self, action: SequenceAction) {
        self.actions.push(action);
    }

    /// Returns every participant in order of first appearance.
    ///
    /// Declared participants come first, followed by the participants created
    /// by events. Names that repeat across phases are listed once.
    pub fn introduced_participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = self.participants.iter().map(String::as_str).collect();
        let created = self
            .actions
            .iter()
            .flat_map(|action| action.phases())
            .flat_map(|phase| phase.events())
            .filter(|event| event.creates_participant())
            .map(Event::to);

        for name in created {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}
