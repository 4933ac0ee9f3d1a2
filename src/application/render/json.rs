//! Pretty-printed JSON output, same structure as the array renderer.

use tracing::instrument;

use crate::application::error::{RenderError, RenderResult};
use crate::application::render::array::menu_to_value;
use crate::application::render::{MenuRenderer, RenderOptions, Rendered};
use crate::domain::MenuItem;

#[derive(Debug, Clone)]
pub struct JsonRenderer {
    options: RenderOptions,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self {
            options: RenderOptions::new().with("menuId", "default"),
        }
    }
}

impl MenuRenderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[instrument(level = "debug", skip_all)]
    fn render(&self, menu: &[MenuItem], overrides: Option<&RenderOptions>) -> RenderResult<Rendered> {
        self.effective_options(overrides)?;
        let value = menu_to_value(menu)?;
        let text =
            serde_json::to_string_pretty(&value).map_err(|e| RenderError::Serialize(e.to_string()))?;
        Ok(Rendered::Text(text))
    }
}
