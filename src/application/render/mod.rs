//! Menu renderers
//!
//! Renderers consume an already sorted snapshot and never touch the engine.

pub mod array;
pub mod bootstrap;
pub mod html;
pub mod json;
pub mod options;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::error::RenderResult;
use crate::domain::MenuItem;

pub use array::ArrayRenderer;
pub use bootstrap::BootstrapRenderer;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use options::{OptionValue, RenderOptions};

/// Output of a render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Serialized text (markup or JSON)
    Text(String),
    /// Plain nested mapping
    Value(Value),
}

impl Rendered {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(s) => Some(s),
            Rendered::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Rendered::Value(v) => Some(v),
            Rendered::Text(_) => None,
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Text(s) => write!(f, "{s}"),
            Rendered::Value(v) => match serde_json::to_string_pretty(v) {
                Ok(s) => write!(f, "{s}"),
                Err(_) => write!(f, "{v}"),
            },
        }
    }
}

/// Pluggable menu formatter.
pub trait MenuRenderer: Send + Sync {
    /// Short renderer name, used in error messages.
    fn name(&self) -> &'static str;

    /// Effective default options (the schema overrides are checked against).
    fn options(&self) -> &RenderOptions;

    /// Render a sorted menu. `overrides` are validated and merged over
    /// `options()` for this call only.
    fn render(&self, menu: &[MenuItem], overrides: Option<&RenderOptions>) -> RenderResult<Rendered>;

    /// Defaults merged with validated overrides.
    fn effective_options(&self, overrides: Option<&RenderOptions>) -> RenderResult<RenderOptions> {
        match overrides {
            Some(overrides) => self.options().merged(self.name(), overrides),
            None => Ok(self.options().clone()),
        }
    }
}

/// Renderer variants selectable from config and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Html,
    Bootstrap,
    Json,
    Array,
}

impl RendererKind {
    /// Build the renderer with its compiled defaults.
    pub fn create(self) -> Box<dyn MenuRenderer> {
        match self {
            RendererKind::Html => Box::new(HtmlRenderer::new()),
            RendererKind::Bootstrap => Box::new(BootstrapRenderer::new()),
            RendererKind::Json => Box::new(JsonRenderer::new()),
            RendererKind::Array => Box::new(ArrayRenderer::new()),
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RendererKind::Html => "html",
            RendererKind::Bootstrap => "bootstrap",
            RendererKind::Json => "json",
            RendererKind::Array => "array",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(RendererKind::Html),
            "bootstrap" => Ok(RendererKind::Bootstrap),
            "json" => Ok(RendererKind::Json),
            "array" => Ok(RendererKind::Array),
            other => Err(format!("unknown renderer: {other}")),
        }
    }
}
