//! Bootstrap navbar markup: the HTML list wrapped in nav/container/collapse elements.

use tracing::instrument;

use crate::application::error::RenderResult;
use crate::application::render::html::{
    finish, html_attr, indentation, pad, render_items, HtmlRenderer, ItemStyle,
};
use crate::application::render::{MenuRenderer, RenderOptions, Rendered};
use crate::domain::link::render_attributes;
use crate::domain::MenuItem;

#[derive(Debug, Clone)]
pub struct BootstrapRenderer {
    options: RenderOptions,
}

impl Default for BootstrapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapRenderer {
    pub fn new() -> Self {
        Self {
            options: Self::defaults(),
        }
    }

    pub fn with_options(overrides: &RenderOptions) -> RenderResult<Self> {
        Ok(Self {
            options: Self::defaults().merged("bootstrap", overrides)?,
        })
    }

    /// HTML defaults plus the navbar wrapper classes, indented by four.
    pub fn defaults() -> RenderOptions {
        HtmlRenderer::defaults()
            .with("navClass", "navbar navbar-expand-lg navbar-light bg-light")
            .with("containerClass", "container")
            .with("wrapperClass", "collapse navbar-collapse")
            .with("whiteSpaces", 4_i64)
    }
}

impl MenuRenderer for BootstrapRenderer {
    fn name(&self) -> &'static str {
        "bootstrap"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[instrument(level = "debug", skip_all)]
    fn render(&self, menu: &[MenuItem], overrides: Option<&RenderOptions>) -> RenderResult<Rendered> {
        let options = self.effective_options(overrides)?;
        let indent = indentation(&options);
        let style = ItemStyle::from_options(&options);

        let mut lines = vec![
            format!(
                "{}<nav{}{}>",
                pad(indent),
                html_attr("id", options.str("menuId")),
                html_attr("class", options.str("navClass")),
            ),
            format!("{}<div{}>", pad(indent + 2), html_attr("class", options.str("containerClass"))),
            format!("{}<div{}>", pad(indent + 4), html_attr("class", options.str("wrapperClass"))),
            format!(
                "{}<ul{}{}>",
                pad(indent + 6),
                html_attr("class", options.str("menuClass")),
                render_attributes(&options.map("menuAttributes")),
            ),
        ];
        render_items(&mut lines, menu, &style, indent + 8);
        lines.push(format!("{}</ul>", pad(indent + 6)));
        lines.push(format!("{}</div>", pad(indent + 4)));
        lines.push(format!("{}</div>", pad(indent + 2)));
        lines.push(format!("{}</nav>", pad(indent)));

        Ok(Rendered::Text(finish(lines)))
    }
}
