//! Blueprint document types.
//!
//! A [`Blueprint`] describes named actions, each made of ordered phases that
//! invoke a workflow function with arguments. The types deserialize from the
//! Kanister blueprint layout:
//!
//! ```yaml
//! actions:
//!   backup:
//!     phases:
//!       - func: ScaleWorkload
//!         name: shutdownPod
//!         args:
//!           namespace: "{{ .Deployment.Namespace }}"
//!           kind: Deployment
//!           name: "{{ .Deployment.Name }}"
//!           replicas: 0
//! ```
//!
//! Fields that the translation does not use (`apiVersion`, `kind`, artifacts,
//! ...) are accepted and ignored. Documents are expected to be validated by an
//! external schema validator before they reach this crate.
//!
//! Phase arguments are read through typed accessors such as
//! [`BlueprintPhase::str_arg`], which fail with an [`ArgumentError`] instead of
//! coercing a value of the wrong shape.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Reason an argument could not be extracted from a phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("argument is missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

/// A phase argument value.
///
/// Mirrors the value shapes a YAML or JSON document can hold. Maps keep their
/// declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ArgValue>),
    Map(IndexMap<String, ArgValue>),
}

impl ArgValue {
    /// Returns a short name for the value's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` for strings, numbers and booleans.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Borrow the value as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::WrongType`] if the value is not a string.
    pub fn as_str(&self) -> Result<&str, ArgumentError> {
        match self {
            Self::String(value) => Ok(value),
            other => Err(ArgumentError::WrongType {
                expected: "string",
                found: other.kind_name(),
            }),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(items: Vec<ArgValue>) -> Self {
        Self::List(items)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlueprintMetadata {
    #[serde(default)]
    name: Option<String>,
}

/// A workflow document: named actions in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Blueprint {
    #[serde(default)]
    metadata: Option<BlueprintMetadata>,

    #[serde(default)]
    actions: IndexMap<String, BlueprintAction>,
}

impl Blueprint {
    /// Creates an empty blueprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the blueprint name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata = Some(BlueprintMetadata {
            name: Some(name.into()),
        });
        self
    }

    /// Adds an action, replacing any action with the same name in place.
    pub fn with_action(mut self, name: impl Into<String>, action: BlueprintAction) -> Self {
        self.actions.insert(name.into(), action);
        self
    }

    /// Returns the blueprint name from its metadata, if any.
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|meta| meta.name.as_deref())
    }

    /// Returns the actions in declaration order.
    pub fn actions(&self) -> &IndexMap<String, BlueprintAction> {
        &self.actions
    }
}

/// A named action: an ordered list of phases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlueprintAction {
    #[serde(default)]
    phases: Vec<BlueprintPhase>,
}

impl BlueprintAction {
    pub fn new(phases: Vec<BlueprintPhase>) -> Self {
        Self { phases }
    }

    /// Appends a phase.
    pub fn with_phase(mut self, phase: BlueprintPhase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn phases(&self) -> &[BlueprintPhase] {
        &self.phases
    }
}

/// One step of an action: a function invocation with arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlueprintPhase {
    func: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    args: IndexMap<String, ArgValue>,
}

impl BlueprintPhase {
    /// Creates a phase invoking `func` with no arguments.
    pub fn new(func: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            func: func.into(),
            name: name.into(),
            args: IndexMap::new(),
        }
    }

    /// Adds an argument.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Returns the function identifier.
    pub fn func(&self) -> &str {
        &self.func
    }

    /// Returns the human-readable phase name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &IndexMap<String, ArgValue> {
        &self.args
    }

    /// Returns the raw argument value, treating `null` as absent.
    pub fn arg(&self, key: &str) -> Option<&ArgValue> {
        self.args
            .get(key)
            .filter(|value| !matches!(value, ArgValue::Null))
    }

    /// Returns a required argument of any shape.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] if the argument is absent or `null`.
    pub fn require(&self, key: &str) -> Result<&ArgValue, ArgumentError> {
        self.arg(key).ok_or(ArgumentError::Missing)
    }

    /// Returns a required string argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] if the argument is absent, or
    /// [`ArgumentError::WrongType`] if it holds anything other than a string.
    pub fn str_arg(&self, key: &str) -> Result<&str, ArgumentError> {
        self.require(key)?.as_str()
    }

    /// Returns an optional string argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::WrongType`] if the argument is present but not a string.
    pub fn opt_str_arg(&self, key: &str) -> Result<Option<&str>, ArgumentError> {
        self.arg(key).map(ArgValue::as_str).transpose()
    }

    /// Returns a required scalar argument (string, number or boolean).
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] if the argument is absent, or
    /// [`ArgumentError::WrongType`] if it holds a list or a map.
    pub fn scalar_arg(&self, key: &str) -> Result<&ArgValue, ArgumentError> {
        let value = self.require(key)?;
        if value.is_scalar() {
            Ok(value)
        } else {
            Err(ArgumentError::WrongType {
                expected: "scalar",
                found: value.kind_name(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKUP_BLUEPRINT: &str = r#"
apiVersion: cr.kanister.io/v1alpha1
kind: Blueprint
metadata:
  name: mysql-blueprint
actions:
  backup:
    outputArtifacts:
      mysqlCloudDump:
        keyValue:
          s3path: "{{ .Phases.dumpToObjectStore.Output.s3path }}"
    phases:
      - func: ScaleWorkload
        name: shutdownPod
        args:
          namespace: "{{ .StatefulSet.Namespace }}"
          kind: StatefulSet
          name: "{{ .StatefulSet.Name }}"
          replicas: 0
      - func: KubeTask
        name: dumpToObjectStore
        args:
          image: ghcr.io/kanisterio/mysql-sidecar:0.110.0
          command:
            - bash
            - -c
            - mysqldump
  restore:
    phases: []
"#;

    fn parse(yaml: &str) -> Blueprint {
        serde_yaml::from_str(yaml).expect("Failed to parse blueprint")
    }

    #[test]
    fn test_deserialize_kanister_layout() {
        let blueprint = parse(BACKUP_BLUEPRINT);

        assert_eq!(blueprint.name(), Some("mysql-blueprint"));
        let names: Vec<_> = blueprint.actions().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["backup", "restore"]);

        let backup = &blueprint.actions()["backup"];
        assert_eq!(backup.phases().len(), 2);
        assert_eq!(backup.phases()[0].func(), "ScaleWorkload");
        assert_eq!(backup.phases()[0].name(), "shutdownPod");
        assert_eq!(
            backup.phases()[0].arg("replicas"),
            Some(&ArgValue::Integer(0))
        );
        assert!(blueprint.actions()["restore"].phases().is_empty());
    }

    #[test]
    fn test_deserialize_value_shapes() {
        let blueprint = parse(BACKUP_BLUEPRINT);
        let task = &blueprint.actions()["backup"].phases()[1];

        let command = task.require("command").unwrap();
        assert_eq!(command.kind_name(), "list");
        assert_eq!(command.to_string(), "[bash, -c, mysqldump]");
        assert_eq!(
            task.str_arg("image"),
            Ok("ghcr.io/kanisterio/mysql-sidecar:0.110.0")
        );
    }

    #[test]
    fn test_action_order_follows_document() {
        let blueprint = parse(
            r#"
actions:
  zeta:
    phases: []
  alpha:
    phases: []
  mid:
    phases: []
"#,
        );
        let names: Vec<_> = blueprint.actions().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_str_arg_rejects_other_shapes() {
        let phase = BlueprintPhase::new("KubeTask", "task")
            .with_arg("namespace", 3)
            .with_arg("image", "busybox");

        assert_eq!(phase.str_arg("image"), Ok("busybox"));
        assert_eq!(
            phase.str_arg("namespace"),
            Err(ArgumentError::WrongType {
                expected: "string",
                found: "integer"
            })
        );
        assert_eq!(phase.str_arg("command"), Err(ArgumentError::Missing));
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let phase: BlueprintPhase =
            serde_yaml::from_str("func: KubeTask\nname: t\nargs:\n  namespace: ~\n").unwrap();

        assert_eq!(phase.arg("namespace"), None);
        assert_eq!(phase.opt_str_arg("namespace"), Ok(None));
        assert_eq!(phase.require("namespace"), Err(ArgumentError::Missing));
    }

    #[test]
    fn test_scalar_arg() {
        let phase = BlueprintPhase::new("ScaleWorkload", "scale")
            .with_arg("replicas", 2)
            .with_arg("ready", true)
            .with_arg("pods", vec![ArgValue::from("a"), ArgValue::from("b")]);

        assert_eq!(phase.scalar_arg("replicas").unwrap().to_string(), "2");
        assert_eq!(phase.scalar_arg("ready").unwrap().to_string(), "true");
        assert_eq!(
            phase.scalar_arg("pods"),
            Err(ArgumentError::WrongType {
                expected: "scalar",
                found: "list"
            })
        );
    }

    #[test]
    fn test_display_map_keeps_order() {
        let value: ArgValue = serde_yaml::from_str("b: 1\na: x\nc: 1.5\n").unwrap();
        assert_eq!(value.to_string(), "{b: 1, a: x, c: 1.5}");
    }

    #[test]
    fn test_missing_args_default_to_empty() {
        let phase: BlueprintPhase = serde_yaml::from_str("func: Wait\nname: w\n").unwrap();
        assert!(phase.args().is_empty());
    }
}
