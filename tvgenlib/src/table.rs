//! Lookup tables for `F::lut` columns.
//!
//! Tables are loaded once, while the header row is resolved. Loading goes
//! through the [`TableLoader`] trait so callers can serve tables from
//! somewhere other than the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TvgenError;
use crate::Result;

/// Mapping from raw cell text to its output word.
pub type LookupTable = HashMap<String, String>;

/// Source of lookup tables referenced by `F::lut` directives.
pub trait TableLoader {
    /// Load the table named by `path` exactly as written in the directive.
    fn load(&self, path: &Path) -> Result<LookupTable>;
}

/// Loads tables from JSON files holding a single object of string values.
#[derive(Debug, Clone, Default)]
pub struct JsonTableLoader {
    /// Directory that relative table paths are resolved against.
    /// `None` resolves against the working directory.
    pub base_dir: Option<PathBuf>,
}

impl JsonTableLoader {
    /// Loader resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir` instead.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TableLoader for JsonTableLoader {
    fn load(&self, path: &Path) -> Result<LookupTable> {
        let resolved = self.resolve(path);
        let content = fs::read_to_string(&resolved).map_err(|e| TvgenError::TableLoad {
            path: resolved.clone(),
            message: e.to_string(),
        })?;
        let table = parse_table(&content).map_err(|message| TvgenError::TableLoad {
            path: resolved.clone(),
            message,
        })?;
        debug!(path = %resolved.display(), entries = table.len(), "Loaded lookup table");
        Ok(table)
    }
}

/// Parse the JSON text of a lookup table.
pub fn parse_table(json: &str) -> std::result::Result<LookupTable, String> {
    serde_json::from_str::<LookupTable>(json).map_err(|e| e.to_string())
}

/// In-memory tables keyed by the path as written in the directive.
impl TableLoader for HashMap<PathBuf, LookupTable> {
    fn load(&self, path: &Path) -> Result<LookupTable> {
        self.get(path).cloned().ok_or_else(|| TvgenError::TableLoad {
            path: path.to_path_buf(),
            message: "no such table".to_string(),
        })
    }
}
