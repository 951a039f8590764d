//! Point-in-time snapshot of tracker state and its JSON format
//!
//! The persisted document has three top-level fields:
//!
//! ```json
//! {
//!     "name": "t1",
//!     "functions": {
//!         "slow": {
//!             "calls": 3,
//!             "total_time": 0.0301,
//!             "avg_time": 0.0100
//!         }
//!     },
//!     "events": {
//!         "start": 2
//!     }
//! }
//! ```
//!
//! Maps keep insertion order, so the first function or event seen by the
//! tracker is the first one written.

use crate::error::{Result, TrackError};
use crate::function_profiler::FunctionStats;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Indentation used for persisted snapshots
const JSON_INDENT: &[u8] = b"    ";

/// Owned copy of a tracker's name, function stats and event counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tracker name
    pub name: String,
    /// Function identifier -> statistics
    #[serde(default)]
    pub functions: IndexMap<String, FunctionStats>,
    /// Event identifier -> occurrence count
    #[serde(default)]
    pub events: IndexMap<String, u64>,
}

impl Snapshot {
    /// Create an empty snapshot with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: IndexMap::new(),
            events: IndexMap::new(),
        }
    }

    /// True when neither functions nor events were recorded
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.events.is_empty()
    }

    /// Serialize with 4-space indentation into `writer`
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer).map_err(classify)
    }

    /// Serialize to a JSON string with 4-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        // serde_json only emits valid UTF-8
        String::from_utf8(buf)
            .map_err(|e| TrackError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Write the snapshot to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush()?;
        tracing::info!(
            path = %path.display(),
            functions = self.functions.len(),
            events = self.events.len(),
            "saved snapshot"
        );
        Ok(())
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a snapshot previously written by [`Snapshot::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Route writer failures back to `TrackError::Io`
fn classify(err: serde_json::Error) -> TrackError {
    if err.is_io() {
        TrackError::Io(err.into())
    } else {
        TrackError::Json(err)
    }
}
