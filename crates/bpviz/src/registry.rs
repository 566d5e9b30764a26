//! Function kind registry.
//!
//! Each workflow function that can appear in a phase is described by a
//! [`FunctionKind`]: which argument holds the target namespace, how the
//! diagram participant is named, and what the call note says. The
//! [`FunctionRegistry`] maps function identifiers to their descriptors and is
//! read-only during translation, so one registry can serve any number of
//! translations.
//!
//! Adding support for a new function means registering one more descriptor,
//! either in code through [`FunctionRegistry::register`] or through the
//! `[[functions]]` tables of the configuration.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::template::Template;

/// Argument key that holds the target namespace unless a kind overrides it.
pub const DEFAULT_NAMESPACE_ARG: &str = "namespace";

/// Kanister functions known out of the box: name, participant template, note template.
const KANISTER_FUNCTIONS: &[(&str, &str, &str)] = &[
    (
        "KubeTask",
        "{namespace}/kanister-job",
        "Create a tooling pod with <br> image: {image} <br> namespace: {namespace} <br> and execute commands",
    ),
    (
        "ScaleWorkload",
        "{namespace}/{kind}/{name}",
        "Set the replica count <br> of {kind}/{name} to {replicas}",
    ),
    (
        "KubeExec",
        "{namespace}/{pod}",
        "Execute commands <br> in pod {pod}",
    ),
    (
        "KubeExecAll",
        "{namespace}/pods",
        "Execute commands <br> in pods {pods}",
    ),
    (
        "PrepareData",
        "{namespace}/kanister-job",
        "Create a pod with <br> image: {image} <br> mount volumes and execute commands",
    ),
    (
        "BackupData",
        "{namespace}/{pod}",
        "Back up {includePath} <br> from container {container} <br> to {backupArtifactPrefix}",
    ),
    (
        "CopyVolumeData",
        "{namespace}/{volume}",
        "Copy the data of volume {volume} <br> to {dataArtifactPrefix}",
    ),
];

fn default_namespace_arg() -> String {
    DEFAULT_NAMESPACE_ARG.to_string()
}

/// Describes how phases invoking one function are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionKind {
    /// Function identifier matched against `phase.func`.
    name: String,

    /// Argument key holding the target namespace.
    #[serde(default = "default_namespace_arg")]
    namespace_arg: String,

    /// Template for the synthesized participant name.
    participant: Template,

    /// Template for the note attached to the call.
    note: Template,
}

impl FunctionKind {
    /// Creates a descriptor reading the namespace from [`DEFAULT_NAMESPACE_ARG`].
    ///
    /// # Arguments
    ///
    /// * `name` - Function identifier.
    /// * `participant` - Participant name template, e.g. `{namespace}/{pod}`.
    /// * `note` - Call note template.
    pub fn new(
        name: impl Into<String>,
        participant: impl Into<Template>,
        note: impl Into<Template>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace_arg: default_namespace_arg(),
            participant: participant.into(),
            note: note.into(),
        }
    }

    /// Reads the namespace from a different argument key.
    pub fn with_namespace_arg(mut self, key: impl Into<String>) -> Self {
        self.namespace_arg = key.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_arg(&self) -> &str {
        &self.namespace_arg
    }

    pub fn participant(&self) -> &Template {
        &self.participant
    }

    pub fn note(&self) -> &Template {
        &self.note
    }
}

/// Lookup table from function identifier to [`FunctionKind`].
///
/// Iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    kinds: IndexMap<String, FunctionKind>,
}

impl FunctionRegistry {
    /// Creates a registry with no function kinds.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in Kanister function kinds.
    pub fn kanister() -> Self {
        let mut registry = Self::empty();
        for (name, participant, note) in KANISTER_FUNCTIONS {
            registry.register(FunctionKind::new(*name, *participant, *note));
        }
        registry
    }

    /// Registers a function kind, returning the descriptor it replaced.
    pub fn register(&mut self, kind: FunctionKind) -> Option<FunctionKind> {
        self.kinds.insert(kind.name.clone(), kind)
    }

    /// Looks up the descriptor for a function identifier.
    pub fn get(&self, function: &str) -> Option<&FunctionKind> {
        self.kinds.get(function)
    }

    pub fn contains(&self, function: &str) -> bool {
        self.kinds.contains_key(function)
    }

    /// Iterates over the registered kinds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionKind> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
