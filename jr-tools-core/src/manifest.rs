//! Data model for the declarative load manifest.
//!
//! The manifest lists which files and report units to (re)provision on the
//! server. Entries are ephemeral: the loader constructs them from the parsed
//! document, drives the client through them once, and discards them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level manifest: ordered lists of report units and files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub reports: Vec<ReportEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One report unit to provision: its repository uri plus references to the
/// jrxml template, the data source, and its input-control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub uri: String,
    pub jrxml_uri: String,
    pub data_source_uri: String,
    #[serde(default)]
    pub params: Vec<InputControlParam>,
}

/// One local file to upload into the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub uri: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Parameter definition backing a report unit's input control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputControlParam {
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}
