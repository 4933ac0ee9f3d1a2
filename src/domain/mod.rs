//! Domain layer: menu trees, links and source records
//!
//! This layer is independent of external concerns (no I/O, no rendering, no config loading).

pub mod arena;
pub mod error;
pub mod item;
pub mod link;
pub mod source;

pub use arena::{MenuArena, MenuNode};
pub use error::{DomainError, DomainResult};
pub use item::{find_item, menu_tree_string, sort_menu, MenuItem, TreeDisplay, DEFAULT_WEIGHT};
pub use link::{Attributes, Link};
pub use source::{parse_menu_source, parse_source_map, MenuSource, SourceMap, SourceRecord};
