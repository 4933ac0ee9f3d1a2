//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, MenuCache)
//! but are themselves concrete structs, not traits.

mod menu_builder;
mod source;

pub use menu_builder::{MenuBuilder, NewItem, DEFAULT_CACHE_KEY_PREFIX, DEFAULT_MENU_ID};
pub use source::{SourceFormat, SourceService};
