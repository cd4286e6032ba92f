//! Argument descriptors and value extraction

use serde::Deserialize;
use crate::errors::{CmdlineError, Result};

/// How an argument consumes input tokens
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Presence-only switch, e.g. `-verbose`
    #[serde(alias = "switch")]
    Flag,
    /// Flag followed by a value token, e.g. `-name Ada`
    #[serde(rename = "value", alias = "value_taking")]
    ValueTaking,
}

/// Declared data type of an argument value
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        }
    }

    /// Check that a raw token parses as this type
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ValueType::String => true,
            ValueType::Integer => value.parse::<i64>().is_ok(),
            ValueType::Float => value.parse::<f64>().is_ok(),
            ValueType::Boolean => value.parse::<bool>().is_ok(),
        }
    }
}

/// A named flag belonging to a command
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Argument {
    /// Name matched against `-<name>` tokens
    pub name: String,

    /// Human readable name used in usage and help output
    pub friendly_name: String,

    pub description: String,

    #[serde(rename = "type")]
    pub value_type: ValueType,

    #[serde(rename = "input_type")]
    pub value_kind: ValueKind,

    #[serde(default)]
    pub required: bool,
}

impl Argument {
    /// Create an optional presence-only argument
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueKind::Flag)
    }

    /// Create an optional string-valued argument
    pub fn value(name: &str) -> Self {
        Self::new(name, ValueKind::ValueTaking)
    }

    fn new(name: &str, value_kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            friendly_name: name.to_string(),
            description: String::new(),
            value_type: ValueType::String,
            value_kind,
            required: false,
        }
    }

    /// Mark the argument as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn with_description(mut self, friendly_name: &str, description: &str) -> Self {
        self.friendly_name = friendly_name.to_string();
        self.description = description.to_string();
        self
    }

    /// The token that introduces this argument in user input
    pub fn flag_token(&self) -> String {
        format!("-{}", self.name)
    }

    /// Find this argument in `tokens` and extract its binding.
    ///
    /// `tokens` are the input tokens following the command name. Flag order is
    /// irrelevant and a repeated flag resolves to its first occurrence. Returns
    /// `Ok(None)` when an optional argument is absent.
    pub fn extract_value(
        &self,
        command: &str,
        tokens: &[&str],
    ) -> Result<Option<(String, Option<String>)>> {
        let flag = self.flag_token();
        let Some(index) = tokens.iter().position(|t| *t == flag) else {
            if self.required {
                return Err(CmdlineError::MissingArgument {
                    command: command.to_string(),
                    argument: self.name.clone(),
                });
            }
            return Ok(None);
        };

        match self.value_kind {
            ValueKind::Flag => Ok(Some((self.name.clone(), None))),
            ValueKind::ValueTaking => {
                let value = tokens.get(index + 1).ok_or_else(|| {
                    CmdlineError::MissingArgumentValue {
                        command: command.to_string(),
                        argument: self.name.clone(),
                    }
                })?;

                if !self.value_type.accepts(value) {
                    return Err(CmdlineError::InvalidArgumentValue {
                        command: command.to_string(),
                        argument: self.name.clone(),
                        value: value.to_string(),
                        expected: self.value_type.as_str(),
                    });
                }

                Ok(Some((self.name.clone(), Some(value.to_string()))))
            }
        }
    }

    /// Usage fragment, e.g. `-name <Name>` or `[-verbose]`
    pub fn usage(&self) -> String {
        let fragment = match self.value_kind {
            ValueKind::Flag => self.flag_token(),
            ValueKind::ValueTaking => format!("{} <{}>", self.flag_token(), self.friendly_name),
        };

        if self.required {
            fragment
        } else {
            format!("[{}]", fragment)
        }
    }
}
