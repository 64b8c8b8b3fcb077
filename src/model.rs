// src/model.rs
//
// Data shapes shared across the pipeline.
//
// - RawTable: what the compat-table scraper produces for one page
//   (platform class -> feature -> browser -> slot record, all free text).
// - CompatRecord: the normalized per-page record that ends up in the
//   output batch.
//
// BTreeMap everywhere so serialization is deterministic run-to-run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The two raw text fields a compat cell can carry.
/// `Normal` is the unprefixed support column, `Prefix` the
/// vendor-prefixed variant split off the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Normal,
    Prefix,
}

impl Slot {
    /// Key used for the notes attachment, matching the raw slot names.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Normal => "normal",
            Slot::Prefix => "prefix",
        }
    }
}

/// Closed set of support-level codes, caniuse-style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Support {
    /// `y` - supported by default
    Yes,
    /// `x` - supported behind a vendor prefix
    Prefixed,
    /// `a` - partial/conditional support ("almost")
    Almost,
    /// `n` - explicitly not supported or removed
    No,
    /// `u` - unknown / unclassifiable
    Unknown,
}

impl Support {
    pub fn code(self) -> &'static str {
        match self {
            Support::Yes => "y",
            Support::Prefixed => "x",
            Support::Almost => "a",
            Support::No => "n",
            Support::Unknown => "u",
        }
    }

    /// Code for a slot that turned out to be a plain "yes" or a bare
    /// version number: unprefixed vs prefixed support.
    pub fn for_slot(slot: Slot) -> Self {
        match slot {
            Slot::Normal => Support::Yes,
            Slot::Prefix => Support::Prefixed,
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One table cell after splitting: up to two raw strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotRecord {
    pub normal: Option<String>,
    pub prefix: Option<String>,
}

impl SlotRecord {
    pub fn is_empty(&self) -> bool {
        self.normal.is_none() && self.prefix.is_none()
    }
}

/// feature -> browser -> slot record
pub type FeatureTable = BTreeMap<String, BTreeMap<String, SlotRecord>>;

/// platform class ("desktop" / "mobile") -> feature table
pub type RawTable = BTreeMap<String, FeatureTable>;

/// Normalized support info for one (feature, browser) node.
///
/// `versions` maps a marker (version number or `"?"`) to one or more
/// space-separated support codes. `notes` keeps the original raw text per
/// slot whenever classification stripped or reinterpreted something.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BrowserSupport {
    #[serde(flatten)]
    pub versions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<String, String>,
}

impl BrowserSupport {
    /// Insert a (marker, code) pair. When the marker is already taken by a
    /// different code the new one is appended space-separated instead of
    /// overwriting. Ambiguous, but data-preserving; documented limitation.
    pub fn insert_version(&mut self, marker: &str, code: Support) {
        let code = code.code();
        match self.versions.get_mut(marker) {
            Some(existing) => {
                if !existing.split(' ').any(|c| c == code) {
                    existing.push(' ');
                    existing.push_str(code);
                }
            }
            None => {
                self.versions.insert(marker.to_string(), code.to_string());
            }
        }
    }

    pub fn add_note(&mut self, slot: Slot, text: &str) {
        self.notes.insert(slot.key().to_string(), text.to_string());
    }
}

/// platform class -> feature -> browser -> normalized support
pub type Contents = BTreeMap<String, BTreeMap<String, BTreeMap<String, BrowserSupport>>>;

/// One normalized record per source page.
#[derive(Clone, Debug, Serialize)]
pub struct CompatRecord {
    pub breadcrumb: Vec<String>,
    pub category: String,
    pub origin: String,
    pub slug: String,
    pub contents: Contents,
}
