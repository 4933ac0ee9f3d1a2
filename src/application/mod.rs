//! Application layer: menu engine, renderers and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod render;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, RenderError, RenderResult};
pub use error_ext::IoResultExt;
pub use services::{MenuBuilder, NewItem};
