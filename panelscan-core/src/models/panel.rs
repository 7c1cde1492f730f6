use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use log::warn;
use serde_json::Value;

use crate::errors::PanelError;
use crate::models::reference::{RawEntry, ReferenceEntry};

/// The curated, read-only reference panel.
///
/// Built once at startup from a JSON document mapping reference keys to
/// entries; iteration order is the file's declared order, which also fixes
/// the matcher's tie-break behavior. The panel is immutable and `Sync`, so
/// any number of concurrent queries may share one instance.
#[derive(Debug, Clone)]
pub struct ReferencePanel {
    entries: Vec<ReferenceEntry>,
}

impl ReferencePanel {
    /// Load a panel from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PanelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load a panel from a JSON string.
    ///
    /// Malformed entries (bad cds_start, invalid domain intervals, non-ACGT
    /// bases) are excluded and logged rather than failing the whole panel;
    /// a panel with no usable entries at all is an error.
    pub fn from_json_str(contents: &str) -> Result<Self, PanelError> {
        let document: Value = serde_json::from_str(contents)?;
        let map = document
            .as_object()
            .ok_or(PanelError::InvalidPanelFormat)?;

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let raw: RawEntry = match serde_json::from_value(value.clone()) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("excluding panel entry '{name}': {e}");
                    continue;
                }
            };
            match ReferenceEntry::from_raw(name, raw) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("excluding panel entry: {e}"),
            }
        }

        if entries.is_empty() {
            return Err(PanelError::EmptyPanel);
        }
        Ok(ReferencePanel { entries })
    }

    /// Entries in declared (file) order.
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for ReferencePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferencePanel with {} entries.", self.len())
    }
}
