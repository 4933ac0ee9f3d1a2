//! Nested `<ul>/<li>` markup.

use tracing::instrument;

use crate::application::error::RenderResult;
use crate::application::render::{MenuRenderer, RenderOptions, Rendered};
use crate::domain::link::{escape_html, merge_attributes, merge_tokens, render_attributes};
use crate::domain::{Attributes, MenuItem};

/// Indentation step between nesting levels.
const INDENT: usize = 2;

/// Renders a menu as an indented HTML list.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            options: Self::defaults(),
        }
    }

    /// Renderer with `overrides` merged into its defaults.
    pub fn with_options(overrides: &RenderOptions) -> RenderResult<Self> {
        Ok(Self {
            options: Self::defaults().merged("html", overrides)?,
        })
    }

    pub fn defaults() -> RenderOptions {
        RenderOptions::new()
            .with("menuId", "default")
            .with("menuClass", "navbar-nav")
            .with("menuItemClass", "nav-item")
            .with("menuAttributes", Attributes::new())
            .with("menuItemAttributes", attributes(&[("class", "nav-link")]))
            .with("subMenuClass", "dropdown-menu")
            .with("subMenuStyle", "")
            .with("openOnHover", false)
            .with("animationSpeed", "fast")
            .with("whiteSpaces", 0_i64)
    }
}

impl MenuRenderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[instrument(level = "debug", skip_all)]
    fn render(&self, menu: &[MenuItem], overrides: Option<&RenderOptions>) -> RenderResult<Rendered> {
        let options = self.effective_options(overrides)?;
        let indent = indentation(&options);
        let style = ItemStyle::from_options(&options);

        let mut lines = Vec::new();
        lines.push(format!(
            "{}<ul{}{}{}>",
            pad(indent),
            html_attr("id", options.str("menuId")),
            html_attr("class", options.str("menuClass")),
            render_attributes(&options.map("menuAttributes")),
        ));
        render_items(&mut lines, menu, &style, indent + INDENT);
        lines.push(format!("{}</ul>", pad(indent)));

        Ok(Rendered::Text(finish(lines)))
    }
}

/// Per-item markup settings derived from an option set.
#[derive(Debug, Clone)]
pub(crate) struct ItemStyle {
    item_class: String,
    link_attributes: Attributes,
    sub_menu_class: String,
    sub_menu_style: String,
}

impl ItemStyle {
    pub(crate) fn from_options(options: &RenderOptions) -> Self {
        let open_on_hover = options.flag("openOnHover");

        let mut link_attributes = options.map("menuItemAttributes");
        let mut sub_menu_class = options.str("subMenuClass").to_string();
        if open_on_hover {
            link_attributes = merge_attributes(
                &link_attributes,
                &attributes(&[("class", "dropdown-toggle"), ("data-toggle", "dropdown")]),
            );
            sub_menu_class = merge_tokens(&sub_menu_class, "dropdown-menu");
        }
        match options.str("animationSpeed") {
            "fast" => sub_menu_class = merge_tokens(&sub_menu_class, "show"),
            "slow" => sub_menu_class = merge_tokens(&sub_menu_class, "slow-animation-class"),
            _ => {}
        }

        Self {
            item_class: options.str("menuItemClass").to_string(),
            link_attributes,
            sub_menu_class,
            sub_menu_style: options.str("subMenuStyle").to_string(),
        }
    }
}

pub(crate) fn render_items(lines: &mut Vec<String>, items: &[MenuItem], style: &ItemStyle, indent: usize) {
    for item in items {
        render_item(lines, item, style, indent);
    }
}

fn render_item(lines: &mut Vec<String>, item: &MenuItem, style: &ItemStyle, indent: usize) {
    lines.push(format!("{}<li{}>", pad(indent), html_attr("class", &style.item_class)));

    let attributes = merge_attributes(item.link.attributes(), &style.link_attributes);
    lines.push(format!(
        "{}{}",
        pad(indent + INDENT),
        item.link.with_attributes(attributes).render()
    ));

    if !item.children.is_empty() {
        lines.push(format!(
            "{}<ul{}{}>",
            pad(indent + INDENT),
            html_attr("class", &style.sub_menu_class),
            html_attr("style", &style.sub_menu_style),
        ));
        render_items(lines, &item.children, style, indent + 2 * INDENT);
        lines.push(format!("{}</ul>", pad(indent + INDENT)));
    }

    lines.push(format!("{}</li>", pad(indent)));
}

/// ` name="value"`, or nothing for an empty value.
pub(crate) fn html_attr(name: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(" {}=\"{}\"", name, escape_html(value))
    }
}

pub(crate) fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

pub(crate) fn indentation(options: &RenderOptions) -> usize {
    usize::try_from(options.int("whiteSpaces")).unwrap_or(0)
}

pub(crate) fn finish(lines: Vec<String>) -> String {
    let mut html = lines.join("\n");
    html.push('\n');
    html
}

fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
