//! Menu source file service
//!
//! Reads JSON or TOML source documents into untyped values for import and
//! writes exported records back as JSON.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::application::error_ext::IoResultExt;
use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::FileSystem;

/// On-disk source format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// `.toml` is TOML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SourceFormat::Toml,
            _ => SourceFormat::Json,
        }
    }
}

/// Service for reading and writing menu source files.
pub struct SourceService {
    fs: Arc<dyn FileSystem>,
}

impl SourceService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read a source document as an untyped value.
    pub fn load(&self, path: &Path) -> ApplicationResult<Value> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read menu source", path)?;
        let format = SourceFormat::from_path(path);
        debug!(path = %path.display(), ?format, "loading menu source");
        Self::parse(&content, format).map_err(|message| ApplicationError::InvalidSource {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse source text. TOML tables become JSON objects, key order kept.
    pub fn parse(content: &str, format: SourceFormat) -> Result<Value, String> {
        match format {
            SourceFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            SourceFormat::Toml => {
                let value: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;
                serde_json::to_value(value).map_err(|e| e.to_string())
            }
        }
    }

    /// Pretty JSON of any exported structure.
    pub fn to_json(source: &impl Serialize) -> ApplicationResult<String> {
        serde_json::to_string_pretty(source).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize menu source".to_string(),
            source: Box::new(e),
        })
    }

    /// Write exported records as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path, source: &impl Serialize) -> ApplicationResult<()> {
        let content = Self::to_json(source)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create directory for", path)?;
        self.fs
            .write(path, &format!("{content}\n"))
            .with_path_context("write menu source", path)?;
        debug!(path = %path.display(), "wrote menu source");
        Ok(())
    }
}
