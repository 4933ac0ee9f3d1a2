//! Hierarchical navigation menus: keyed, weighted trees rendered as HTML,
//! Bootstrap navbars, JSON or plain nested mappings.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
