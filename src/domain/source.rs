//! Flat source records used for import/export of menus.
//!
//! Shape: `menu_id -> item_key -> {label, url, parentKey?, attributes?, rels?, weight?}`.
//! Records mirror the tree but are not authoritative; they exist for
//! serialization round-trips only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::DEFAULT_WEIGHT;
use crate::domain::link::{Attributes, Link};

/// Denormalized projection of one menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub parent_key: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub rels: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: i64,
}

fn default_weight() -> i64 {
    DEFAULT_WEIGHT
}

/// Records of one menu, keyed by item key, in insertion order.
pub type MenuSource = IndexMap<String, SourceRecord>;

/// Records of all menus, keyed by menu id.
pub type SourceMap = IndexMap<String, MenuSource>;

impl SourceRecord {
    pub fn from_link(link: &Link, parent_key: Option<&str>, weight: i64) -> Self {
        Self {
            label: link.anchor().to_string(),
            url: link.href().to_string(),
            parent_key: parent_key.map(str::to_string),
            attributes: link.attributes().clone(),
            rels: link.rels().to_vec(),
            weight,
        }
    }

    pub fn to_link(&self) -> Link {
        Link::new(self.url.clone(), self.label.clone())
            .with_rels(self.rels.iter().cloned())
            .with_attributes(self.attributes.clone())
    }

    /// Validate one untyped record field by field.
    ///
    /// Fails with `InvalidImportRecord` naming the first offending field.
    pub fn from_value(menu: &str, key: &str, value: &Value) -> DomainResult<Self> {
        let invalid = |field: &str, reason: &str| DomainError::invalid_record(menu, key, field, reason);

        let record = value
            .as_object()
            .ok_or_else(|| invalid("record", "must be a mapping"))?;

        let required_string = |field: &str| -> DomainResult<String> {
            match record.get(field) {
                None | Some(Value::Null) => Err(invalid(field, "is a required value")),
                Some(Value::String(s)) if s.is_empty() => Err(invalid(field, "is a required value")),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(invalid(field, "must be a string")),
            }
        };
        let label = required_string("label")?;
        let url = required_string("url")?;

        let parent_key = match record.get("parentKey") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(invalid("parentKey", "must be a string or null")),
        };

        let attributes = match record.get("attributes") {
            None | Some(Value::Null) => Attributes::new(),
            // an empty list is how empty mappings come out of some exporters
            Some(Value::Array(a)) if a.is_empty() => Attributes::new(),
            Some(Value::Object(map)) => {
                let mut attributes = Attributes::new();
                for (name, v) in map {
                    let v = v
                        .as_str()
                        .ok_or_else(|| invalid(&format!("attributes.{name}"), "must be a string"))?;
                    attributes.insert(name.clone(), v.to_string());
                }
                attributes
            }
            Some(_) => return Err(invalid("attributes", "must be a mapping")),
        };

        let rels = match record.get("rels") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("rels", "must be a list of strings"))?,
            Some(_) => return Err(invalid("rels", "must be a list")),
        };

        let weight = match record.get("weight") {
            None | Some(Value::Null) => DEFAULT_WEIGHT,
            Some(v) => v
                .as_i64()
                .ok_or_else(|| invalid("weight", "must be an integer"))?,
        };

        Ok(Self {
            label,
            url,
            parent_key,
            attributes,
            rels,
            weight,
        })
    }
}

/// Validate the records of one menu.
pub fn parse_menu_source(menu: &str, value: &Value) -> DomainResult<MenuSource> {
    let items = value
        .as_object()
        .ok_or_else(|| DomainError::invalid_record(menu, "", "menu", "must be a mapping"))?;
    items
        .iter()
        .map(|(key, record)| {
            Ok::<_, DomainError>((key.clone(), SourceRecord::from_value(menu, key, record)?))
        })
        .collect()
}

/// Validate a whole `menu_id -> records` document.
pub fn parse_source_map(value: &Value) -> DomainResult<SourceMap> {
    let menus = value
        .as_object()
        .ok_or_else(|| DomainError::invalid_record("", "", "source", "must be a mapping"))?;
    menus
        .iter()
        .map(|(menu, items)| Ok::<_, DomainError>((menu.clone(), parse_menu_source(menu, items)?)))
        .collect()
}
