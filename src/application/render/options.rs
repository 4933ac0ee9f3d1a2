//! Renderer option sets.
//!
//! Each renderer owns a fixed schema: its defaults. Overrides must name a known
//! option and carry a value of the same basic type as the default; valid
//! overrides are merged over the defaults.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::application::error::{RenderError, RenderResult};
use crate::domain::Attributes;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Map(Attributes),
}

impl OptionValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Str(_) => "string",
            OptionValue::Map(_) => "array",
        }
    }

    fn same_type(&self, other: &OptionValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Read `text` as a value of this value's type. Maps have no text form.
    fn parse_like(&self, text: &str) -> Option<OptionValue> {
        match self {
            OptionValue::Bool(_) => text.parse().ok().map(OptionValue::Bool),
            OptionValue::Int(_) => text.parse().ok().map(OptionValue::Int),
            OptionValue::Str(_) => Some(OptionValue::Str(text.to_string())),
            OptionValue::Map(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Str(s) => write!(f, "\"{s}\""),
            OptionValue::Map(m) => {
                let pairs: Vec<_> = m.iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<Attributes> for OptionValue {
    fn from(value: Attributes) -> Self {
        OptionValue::Map(value)
    }
}

/// Ordered option set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderOptions(IndexMap<String, OptionValue>);

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    pub fn str(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(OptionValue::Str(s)) => s,
            _ => "",
        }
    }

    pub fn int(&self, name: &str) -> i64 {
        match self.0.get(name) {
            Some(OptionValue::Int(i)) => *i,
            _ => 0,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(OptionValue::Bool(true)))
    }

    pub fn map(&self, name: &str) -> Attributes {
        match self.0.get(name) {
            Some(OptionValue::Map(m)) => m.clone(),
            _ => Attributes::new(),
        }
    }

    /// Check `overrides` against this set used as schema.
    pub fn validate(&self, renderer: &str, overrides: &RenderOptions) -> RenderResult<()> {
        for (name, value) in overrides.iter() {
            let default = self.0.get(name).ok_or_else(|| RenderError::UnknownOption {
                renderer: renderer.to_string(),
                option: name.clone(),
            })?;
            if !default.same_type(value) {
                return Err(RenderError::OptionTypeMismatch {
                    option: name.clone(),
                    expected: default.type_name(),
                    actual: value.type_name(),
                });
            }
        }
        Ok(())
    }

    /// Typed overrides from `NAME=VALUE` text, each value read as the type of
    /// its default.
    pub fn parse_overrides(
        &self,
        renderer: &str,
        raw: &[(String, String)],
    ) -> RenderResult<RenderOptions> {
        raw.iter()
            .map(|(name, text)| -> RenderResult<(String, OptionValue)> {
                let default = self.0.get(name).ok_or_else(|| RenderError::UnknownOption {
                    renderer: renderer.to_string(),
                    option: name.clone(),
                })?;
                let value = default
                    .parse_like(text)
                    .ok_or_else(|| RenderError::OptionTypeMismatch {
                        option: name.clone(),
                        expected: default.type_name(),
                        actual: "string",
                    })?;
                Ok((name.clone(), value))
            })
            .collect()
    }

    /// Validated copy of this set with `overrides` merged on top.
    pub fn merged(&self, renderer: &str, overrides: &RenderOptions) -> RenderResult<RenderOptions> {
        self.validate(renderer, overrides)?;
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.0.insert(name.clone(), value.clone());
        }
        Ok(merged)
    }
}

impl FromIterator<(String, OptionValue)> for RenderOptions {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
