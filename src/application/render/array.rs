//! Plain nested mapping output.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::application::error::{RenderError, RenderResult};
use crate::application::render::{MenuRenderer, RenderOptions, Rendered};
use crate::domain::{Attributes, MenuItem};

#[derive(Serialize)]
struct ItemRecord<'a> {
    key: &'a str,
    label: &'a str,
    url: &'a str,
    attributes: &'a Attributes,
    rels: &'a [String],
    rendered: String,
}

#[derive(Serialize)]
struct TreeRecord<'a> {
    item: ItemRecord<'a>,
    children: IndexMap<&'a str, TreeRecord<'a>>,
}

fn tree_records(menu: &[MenuItem]) -> IndexMap<&str, TreeRecord<'_>> {
    menu.iter()
        .map(|item| {
            let record = TreeRecord {
                item: ItemRecord {
                    key: &item.key,
                    label: item.link.anchor(),
                    url: item.link.href(),
                    attributes: item.link.attributes(),
                    rels: item.link.rels(),
                    rendered: item.link.render(),
                },
                children: tree_records(&item.children),
            };
            (item.key.as_str(), record)
        })
        .collect()
}

/// `{key: {item: {key, label, url, attributes, rels, rendered}, children: {...}}}`
pub(crate) fn menu_to_value(menu: &[MenuItem]) -> RenderResult<Value> {
    serde_json::to_value(tree_records(menu)).map_err(|e| RenderError::Serialize(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct ArrayRenderer {
    options: RenderOptions,
}

impl Default for ArrayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayRenderer {
    pub fn new() -> Self {
        Self {
            options: RenderOptions::new().with("menuId", "default"),
        }
    }
}

impl MenuRenderer for ArrayRenderer {
    fn name(&self) -> &'static str {
        "array"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[instrument(level = "debug", skip_all)]
    fn render(&self, menu: &[MenuItem], overrides: Option<&RenderOptions>) -> RenderResult<Rendered> {
        self.effective_options(overrides)?;
        Ok(Rendered::Value(menu_to_value(menu)?))
    }
}
