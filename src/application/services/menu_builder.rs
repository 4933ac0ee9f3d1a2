//! Menu builder: named menu trees, import/export and cached rendering.
//!
//! All tree operations target the menu selected by `current_id`. Every
//! mutation validates before it changes anything, so a failed call leaves the
//! engine exactly as it was.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::render::{MenuRenderer, RenderOptions, Rendered};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    parse_menu_source, parse_source_map, Attributes, DomainError, DomainResult, Link, MenuArena,
    MenuItem, MenuNode, MenuSource, SourceMap, SourceRecord, DEFAULT_WEIGHT,
};
use crate::infrastructure::traits::MenuCache;

/// Menu id that always exists.
pub const DEFAULT_MENU_ID: &str = "default";

/// Default prefix for render cache keys.
pub const DEFAULT_CACHE_KEY_PREFIX: &str = "menu_";

/// Parameters for `MenuBuilder::add_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub key: String,
    pub label: String,
    pub url: String,
    pub parent: Option<String>,
    pub attributes: Attributes,
    pub rels: Vec<String>,
    pub weight: i64,
}

impl NewItem {
    pub fn new(key: &str, label: &str, url: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            url: url.to_string(),
            parent: None,
            attributes: Attributes::new(),
            rels: Vec::new(),
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn rel(mut self, rel: &str) -> Self {
        self.rels.push(rel.to_string());
        self
    }

    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }
}

/// Registry of named menu trees with pluggable rendering.
pub struct MenuBuilder {
    renderer: Option<Box<dyn MenuRenderer>>,
    cache: Option<Arc<dyn MenuCache>>,
    cache_ttl: Option<Duration>,
    cache_key_prefix: String,
    url_vars: IndexMap<String, String>,
    current_id: String,
    menus: IndexMap<String, MenuArena>,
    sources: SourceMap,
}

impl Default for MenuBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBuilder {
    pub fn new() -> Self {
        let mut menus = IndexMap::new();
        menus.insert(DEFAULT_MENU_ID.to_string(), MenuArena::new());
        Self {
            renderer: None,
            cache: None,
            cache_ttl: None,
            cache_key_prefix: DEFAULT_CACHE_KEY_PREFIX.to_string(),
            url_vars: IndexMap::new(),
            current_id: DEFAULT_MENU_ID.to_string(),
            menus,
            sources: SourceMap::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn MenuRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn MenuCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn MenuRenderer>) {
        self.renderer = Some(renderer);
    }

    pub fn set_cache(&mut self, cache: Option<Arc<dyn MenuCache>>) {
        self.cache = cache;
    }

    /// `None` stores rendered menus without expiry.
    pub fn set_cache_ttl(&mut self, ttl: Option<Duration>) {
        self.cache_ttl = ttl;
    }

    pub fn set_cache_key_prefix(&mut self, prefix: &str) {
        self.cache_key_prefix = prefix.to_string();
    }

    /// Register a URL placeholder: `{name}` in later URLs becomes `value`.
    pub fn set_url_replace_var(&mut self, name: &str, value: &str) {
        self.url_vars.insert(name.to_string(), value.to_string());
    }

    fn current_tree(&self) -> Option<&MenuArena> {
        self.menus.get(&self.current_id)
    }

    fn current_tree_mut(&mut self) -> &mut MenuArena {
        self.menus.entry(self.current_id.clone()).or_default()
    }

    fn expand_url(&self, url: &str) -> String {
        self.url_vars
            .iter()
            .fold(url.to_string(), |url, (name, value)| {
                url.replace(&format!("{{{name}}}"), value)
            })
    }

    // ------------------------------------------------------------
    // Tree operations
    // ------------------------------------------------------------

    /// Insert `link` under `parent_key` (root when `None`) in the current menu.
    ///
    /// Also records the item's source record for export.
    #[instrument(level = "debug", skip(self, link), fields(menu = %self.current_id))]
    pub fn insert(
        &mut self,
        key: &str,
        link: Link,
        parent_key: Option<&str>,
        weight: i64,
    ) -> DomainResult<()> {
        let record = SourceRecord::from_link(&link, parent_key, weight);
        self.current_tree_mut().insert(key, link, parent_key, weight)?;
        self.sources
            .entry(self.current_id.clone())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    /// Build the link from label/url/attributes/rels and insert it.
    pub fn add_item(&mut self, item: NewItem) -> DomainResult<()> {
        let url = self.expand_url(&item.url);
        let link = Link::new(url, item.label)
            .with_rels(item.rels)
            .with_attributes(item.attributes);
        self.insert(&item.key, link, item.parent.as_deref(), item.weight)
    }

    pub fn lookup(&self, key: &str) -> Option<&MenuNode> {
        self.current_tree().and_then(|tree| tree.get(key))
    }

    pub fn link(&self, key: &str) -> Option<&Link> {
        self.lookup(key).map(|node| &node.link)
    }

    /// Remove `key` and its subtree; absent keys are ignored.
    #[instrument(level = "debug", skip(self), fields(menu = %self.current_id))]
    pub fn remove(&mut self, key: &str) {
        let removed = self.current_tree_mut().remove(key);
        if let Some(records) = self.sources.get_mut(&self.current_id) {
            for key in &removed {
                records.shift_remove(key);
            }
        }
        debug!(count = removed.len(), "removed items");
    }

    /// Merge one attribute into the item's link (`class`/`rel` append tokens).
    #[instrument(level = "debug", skip(self), fields(menu = %self.current_id))]
    pub fn merge_attribute(&mut self, key: &str, name: &str, value: &str) -> DomainResult<()> {
        self.current_tree_mut()
            .update_link(key, |link| link.with_added_attribute(name, value))
    }

    /// Mark the item active (`class="active"`).
    pub fn activate(&mut self, key: &str) -> DomainResult<()> {
        self.merge_attribute(key, "class", "active")
    }

    /// Sorted snapshot of the current menu.
    pub fn build(&self) -> Vec<MenuItem> {
        self.current_tree().map(MenuArena::build).unwrap_or_default()
    }

    // ------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------

    /// Import an untyped `menu_id -> key -> record` document.
    ///
    /// Each record is validated field by field before anything is inserted.
    /// With `menu_id`, only that menu is imported and it must be present.
    #[instrument(level = "debug", skip(self, source, url_replace))]
    pub fn import_source(
        &mut self,
        source: &Value,
        menu_id: Option<&str>,
        url_replace: &[(String, String)],
    ) -> DomainResult<()> {
        let parsed = match menu_id {
            Some(id) => {
                let menu = source
                    .get(id)
                    .ok_or_else(|| DomainError::MenuIdNotFound(id.to_string()))?;
                let mut parsed = SourceMap::new();
                parsed.insert(id.to_string(), parse_menu_source(id, menu)?);
                parsed
            }
            None => parse_source_map(source)?,
        };
        self.import_records(&parsed, menu_id, url_replace)
    }

    /// Import typed records through the normal insert path.
    ///
    /// Records are inserted in iteration order, so parents must come first.
    /// All selected menus are staged and committed together: on any failure
    /// nothing changes. The last imported menu becomes current.
    pub fn import_records(
        &mut self,
        source: &SourceMap,
        menu_id: Option<&str>,
        url_replace: &[(String, String)],
    ) -> DomainResult<()> {
        let selected: Vec<(&String, &MenuSource)> = match menu_id {
            Some(id) => {
                let entry = source
                    .get_key_value(id)
                    .ok_or_else(|| DomainError::MenuIdNotFound(id.to_string()))?;
                vec![entry]
            }
            None => source.iter().collect(),
        };

        let mut staged_menus: IndexMap<String, MenuArena> = IndexMap::new();
        let mut staged_sources: SourceMap = SourceMap::new();
        for (id, records) in &selected {
            let tree = staged_menus
                .entry(id.to_string())
                .or_insert_with(|| self.menus.get(id.as_str()).cloned().unwrap_or_default());
            let projection = staged_sources
                .entry(id.to_string())
                .or_insert_with(|| self.sources.get(id.as_str()).cloned().unwrap_or_default());

            for (key, record) in records.iter() {
                let url = url_replace
                    .iter()
                    .fold(record.url.clone(), |url, (search, replace)| {
                        url.replace(search.as_str(), replace)
                    });
                let record = SourceRecord {
                    url: self.expand_url(&url),
                    ..record.clone()
                };
                let link = record.to_link();
                tree.insert(key, link, record.parent_key.as_deref(), record.weight)?;
                projection.insert(key.clone(), record);
            }
            debug!(menu = %id, items = records.len(), "staged menu import");
        }

        self.menus.extend(staged_menus);
        self.sources.extend(staged_sources);
        if let Some((id, _)) = selected.last() {
            self.current_id = id.to_string();
        }
        Ok(())
    }

    /// Source records of one menu; `None` when it has none.
    pub fn export_source(&self, menu_id: &str) -> Option<&MenuSource> {
        self.sources.get(menu_id).filter(|records| !records.is_empty())
    }

    /// Source records of every menu.
    pub fn export_all(&self) -> &SourceMap {
        &self.sources
    }

    // ------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------

    /// Render the current menu.
    ///
    /// `renderer` overrides the configured one. With a cache, a fresh entry
    /// for `<prefix><menu id>` is returned as is, even if the tree changed
    /// since it was stored.
    #[instrument(level = "debug", skip_all, fields(menu = %self.current_id))]
    pub fn render(
        &self,
        options: Option<&RenderOptions>,
        renderer: Option<&dyn MenuRenderer>,
    ) -> ApplicationResult<Rendered> {
        let renderer: &dyn MenuRenderer = match renderer {
            Some(renderer) => renderer,
            None => self
                .renderer
                .as_deref()
                .ok_or(ApplicationError::NoRendererConfigured)?,
        };

        let cache_key = self.cache_key();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key) {
                debug!(key = %cache_key, "render cache hit");
                return Ok(hit);
            }
            debug!(key = %cache_key, "render cache miss");
        }

        let mut options = options.cloned().unwrap_or_default();
        if !options.contains("menuId") {
            options.set("menuId", self.current_id.as_str());
        }
        let rendered = renderer.render(&self.build(), Some(&options))?;

        if let Some(cache) = &self.cache {
            cache.set(&cache_key, rendered.clone(), self.cache_ttl);
        }
        Ok(rendered)
    }

    pub fn cache_key(&self) -> String {
        format!("{}{}", self.cache_key_prefix, self.current_id)
    }

    /// Defaults of the configured renderer.
    pub fn renderer_options(&self) -> ApplicationResult<&RenderOptions> {
        self.renderer
            .as_deref()
            .map(|renderer| renderer.options())
            .ok_or(ApplicationError::NoRendererConfigured)
    }

    /// Read textual `NAME=VALUE` overrides against the configured renderer.
    pub fn parse_render_options(&self, raw: &[(String, String)]) -> ApplicationResult<RenderOptions> {
        let renderer = self
            .renderer
            .as_deref()
            .ok_or(ApplicationError::NoRendererConfigured)?;
        Ok(renderer.options().parse_overrides(renderer.name(), raw)?)
    }

    // ------------------------------------------------------------
    // Menu selection
    // ------------------------------------------------------------

    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    /// Select a menu, creating an empty one for unseen ids.
    pub fn set_current_id(&mut self, id: &str) {
        self.menus.entry(id.to_string()).or_default();
        self.current_id = id.to_string();
    }

    pub fn menu_ids(&self) -> Vec<&str> {
        self.menus.keys().map(String::as_str).collect()
    }

    /// Drop every menu and source record, leaving an empty default menu.
    pub fn reset(&mut self) {
        self.menus.clear();
        self.menus.insert(DEFAULT_MENU_ID.to_string(), MenuArena::new());
        self.sources.clear();
        self.current_id = DEFAULT_MENU_ID.to_string();
    }
}
