//! Input options for a conversion run.
//!
//! This module contains the configuration types that control how the two
//! output streams are assembled and where lookup tables are found.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Extra cycles added when synchronization delay is enabled.
///
/// Models a two flip-flop synchronizer in front of the design under test.
pub const SYNC_STAGES: usize = 2;

/// Options for converting a table into input and expected streams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Pad both streams for a two-stage synchronizer on top of the
    /// one-cycle base latency
    pub sync_delay: bool,
    /// Directory relative lookup-table paths are resolved against
    /// (`None` = working directory)
    pub tables_dir: Option<PathBuf>,
}

impl ConvertOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: enable or disable synchronization delay padding.
    pub fn sync_delay(mut self, enabled: bool) -> Self {
        self.sync_delay = enabled;
        self
    }

    /// Builder: resolve relative lookup-table paths against `dir`.
    pub fn tables_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tables_dir = Some(dir.into());
        self
    }

    /// Number of latency cycles the streams are padded with.
    pub fn latency(&self) -> usize {
        if self.sync_delay {
            1 + SYNC_STAGES
        } else {
            1
        }
    }
}
