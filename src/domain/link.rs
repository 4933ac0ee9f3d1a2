//! Link value object: href, anchor text, attributes and relation tokens.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Attributes whose values are whitespace-separated token lists.
const TOKEN_ATTRIBUTES: [&str; 2] = ["class", "rel"];

/// Ordered attribute map as rendered on the anchor tag.
pub type Attributes = IndexMap<String, String>;

/// Immutable anchor description.
///
/// Updates never mutate a link in place; `with_*` methods return a derived copy,
/// so a link captured in a snapshot stays unchanged when the live tree moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    href: String,
    anchor: String,
    attributes: Attributes,
    rels: Vec<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            anchor: anchor.into(),
            attributes: Attributes::new(),
            rels: Vec::new(),
        }
    }

    /// Builder-style relation tokens (duplicates are dropped).
    pub fn with_rels<I, S>(mut self, rels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rels = rels.into_iter().map(Into::into).unique().collect();
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn rels(&self) -> &[String] {
        &self.rels
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Derive a copy with one attribute merged in.
    ///
    /// `class` and `rel` append their tokens without duplicates; any other
    /// attribute is overwritten.
    pub fn with_added_attribute(&self, name: &str, value: &str) -> Self {
        let mut link = self.clone();
        if name == "rel" {
            let merged = merge_tokens(&link.rels.join(" "), value);
            link.rels = merged.split_whitespace().map(str::to_string).collect();
            return link;
        }
        let merged = if is_token_attribute(name) {
            merge_tokens(link.attribute(name).unwrap_or_default(), value)
        } else {
            value.to_string()
        };
        link.attributes.insert(name.to_string(), merged);
        link
    }

    /// Derive a copy with the full attribute set replaced.
    ///
    /// A `rel` entry is folded into the relation tokens instead of being kept
    /// as a plain attribute.
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        let mut link = self.clone();
        link.attributes = Attributes::new();
        for (name, value) in attributes {
            if name == "rel" {
                link = link.with_added_attribute("rel", &value);
            } else {
                link.attributes.insert(name, value);
            }
        }
        link
    }

    /// Render the anchor tag.
    pub fn render(&self) -> String {
        let mut html = format!("<a href=\"{}\"", escape_html(&self.href));
        if !self.rels.is_empty() {
            html.push_str(&format!(" rel=\"{}\"", escape_html(&self.rels.join(" "))));
        }
        html.push_str(&render_attributes(&self.attributes));
        html.push('>');
        html.push_str(&escape_html(&self.anchor));
        html.push_str("</a>");
        html
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.anchor, self.href)
    }
}

pub(crate) fn is_token_attribute(name: &str) -> bool {
    TOKEN_ATTRIBUTES.contains(&name)
}

/// Union of two token lists, keeping first-seen order.
pub(crate) fn merge_tokens(old: &str, new: &str) -> String {
    old.split_whitespace()
        .chain(new.split_whitespace())
        .unique()
        .join(" ")
}

/// Merge `overlay` onto `base`: token attributes are unioned, the rest overwritten.
pub(crate) fn merge_attributes(base: &Attributes, overlay: &Attributes) -> Attributes {
    let mut merged = base.clone();
    for (name, value) in overlay {
        let next = if is_token_attribute(name) {
            merge_tokens(merged.get(name).map_or("", String::as_str), value)
        } else {
            value.clone()
        };
        merged.insert(name.clone(), next);
    }
    merged
}

/// ` name="value"` pairs, each with a leading space.
pub(crate) fn render_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", escape_html(name), escape_html(value)))
        .collect()
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn given_plain_link_when_render_then_emits_anchor() {
        let link = Link::new("/", "Home");
        assert_eq!(link.render(), r#"<a href="/">Home</a>"#);
    }

    #[test]
    fn given_rels_and_attributes_when_render_then_rel_comes_first() {
        let link = Link::new("/products", "Products")
            .with_rels(["nofollow"])
            .with_attributes(attrs(&[("class", "nav-link")]));
        assert_eq!(
            link.render(),
            r#"<a href="/products" rel="nofollow" class="nav-link">Products</a>"#
        );
    }

    #[test]
    fn given_class_when_adding_class_then_tokens_are_appended_once() {
        let link = Link::new("/", "Home").with_attributes(attrs(&[("class", "nav-link")]));
        let link = link
            .with_added_attribute("class", "active")
            .with_added_attribute("class", "active");
        assert_eq!(link.attribute("class"), Some("nav-link active"));
    }

    #[test]
    fn given_no_class_when_adding_repeated_tokens_then_deduplicated() {
        let link = Link::new("/", "Home").with_added_attribute("class", "a  a b");
        assert_eq!(link.attribute("class"), Some("a b"));

        let merged = merge_attributes(&Attributes::new(), &attrs(&[("class", "x x")]));
        assert_eq!(merged.get("class").map(String::as_str), Some("x"));
    }

    #[test]
    fn given_id_when_adding_id_then_value_is_overwritten() {
        let link = Link::new("/", "Home").with_attributes(attrs(&[("id", "a")]));
        let link = link.with_added_attribute("id", "b");
        assert_eq!(link.attribute("id"), Some("b"));
    }

    #[test]
    fn given_link_when_adding_attribute_then_original_is_untouched() {
        let original = Link::new("/", "Home");
        let derived = original.with_added_attribute("class", "active");
        assert_eq!(original.attribute("class"), None);
        assert_eq!(derived.attribute("class"), Some("active"));
    }

    #[test]
    fn given_rel_attribute_when_replacing_attributes_then_rel_becomes_token() {
        let link = Link::new("/", "Home")
            .with_rels(["nofollow"])
            .with_attributes(attrs(&[("rel", "noopener nofollow"), ("title", "x")]));
        assert_eq!(link.rels(), ["nofollow", "noopener"]);
        assert_eq!(link.attribute("rel"), None);
        assert_eq!(link.attribute("title"), Some("x"));
    }

    #[test]
    fn given_markup_in_anchor_when_render_then_escapes() {
        let link = Link::new("/?a=1&b=2", "<b>\"x\"</b>");
        assert_eq!(
            link.render(),
            r#"<a href="/?a=1&amp;b=2">&lt;b&gt;&quot;x&quot;&lt;/b&gt;</a>"#
        );
    }

    #[test]
    fn test_merge_attributes_keeps_base_keys() {
        let base = attrs(&[("id", "support"), ("class", "active")]);
        let overlay = attrs(&[("class", "nav-link active")]);
        let merged = merge_attributes(&base, &overlay);
        assert_eq!(merged, attrs(&[("id", "support"), ("class", "active nav-link")]));
    }
}
