//! Declarative command schemas.

use serde::{Deserialize, Serialize};

/// Primitive type of a command parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum ParameterKind {
    /// Free text
    String,
    /// Whole number
    Integer,
}

/// A parsed parameter value delivered with an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
pub enum ParamValue {
    /// Text value
    String(String),
    /// Integer value
    Integer(i64),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl ParamValue {
    /// The text value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Integer(_) => None,
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::String(_) => None,
        }
    }

    /// Kind of this value.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::String(_) => ParameterKind::String,
            Self::Integer(_) => ParameterKind::Integer,
        }
    }
}

/// One entry of a parameter's enumerated choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChoice {
    /// Label shown in the client
    pub name: String,
    /// Value delivered with the interaction
    pub value: ParamValue,
}

/// Schema for one command parameter.
///
/// # Examples
///
/// ```
/// use cadenza_core::{ParameterKind, ParameterSpec};
///
/// let level = ParameterSpec::integer("level", "Volume from 0 to 100")
///     .required()
///     .min(0)
///     .max(100);
///
/// assert_eq!(level.kind, ParameterKind::Integer);
/// assert!(level.required);
/// assert_eq!(level.max, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Option name
    pub name: String,
    /// Option description
    pub description: String,
    /// Value type
    pub kind: ParameterKind,
    /// Whether the client must supply it
    pub required: bool,
    /// Inclusive lower bound for integers
    pub min: Option<i64>,
    /// Inclusive upper bound for integers
    pub max: Option<i64>,
    /// Allowed values; empty means unrestricted
    pub choices: Vec<ParameterChoice>,
}

impl ParameterSpec {
    fn new(name: impl Into<String>, description: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
            min: None,
            max: None,
            choices: Vec::new(),
        }
    }

    /// Optional string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::String)
    }

    /// Optional integer parameter.
    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::Integer)
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the inclusive lower bound.
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound.
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Add an allowed value.
    pub fn choice(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.choices.push(ParameterChoice {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Schema for one slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Unique command name
    pub name: String,
    /// Command description
    pub description: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterSpec>,
}

impl CommandSpec {
    /// Create a command with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }
}
