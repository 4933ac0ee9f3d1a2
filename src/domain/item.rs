//! Owned, sorted snapshot of a menu tree as produced by `build()`.

use termtree::Tree;

use crate::domain::link::Link;

/// Default sibling weight.
pub const DEFAULT_WEIGHT: i64 = 50;

/// One node of a built menu, children already ordered by weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: String,
    pub link: Link,
    pub weight: i64,
    pub children: Vec<MenuItem>,
}

/// Sort every level by weight, ascending.
///
/// `sort_by_key` is stable: equal weights keep their prior relative order.
pub fn sort_menu(mut items: Vec<MenuItem>) -> Vec<MenuItem> {
    items.sort_by_key(|item| item.weight);
    for item in &mut items {
        let children = std::mem::take(&mut item.children);
        item.children = sort_menu(children);
    }
    items
}

/// Conversion of built menus into printable trees.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for MenuItem {
    fn to_tree_string(&self) -> Tree<String> {
        let label = format!("{} [{}] -> {}", self.key, self.weight, self.link.href());
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(label).with_leaves(leaves)
    }
}

/// A whole menu prints under a synthetic root named after the menu id.
pub fn menu_tree_string(menu_id: &str, items: &[MenuItem]) -> Tree<String> {
    let leaves: Vec<_> = items.iter().map(|c| c.to_tree_string()).collect();
    Tree::new(menu_id.to_string()).with_leaves(leaves)
}

/// Depth-first lookup in a built snapshot.
pub fn find_item<'a>(items: &'a [MenuItem], key: &str) -> Option<&'a MenuItem> {
    items.iter().find(|i| i.key == key).or_else(|| {
        items
            .iter()
            .find_map(|i| find_item(&i.children, key))
    })
}
