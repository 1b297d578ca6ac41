//! Loading process documents from JSON.
//!
//! Decoding is the only check performed here: ids are not checked for
//! uniqueness and flow references are not resolved. The analyzer copes with
//! both.

use super::read_file;
use crate::errors::{Error, Result};
use crate::model::Process;
use std::path::Path;
use tracing::debug;

/// Read and decode a process document
pub fn load_process(path: &Path) -> Result<Process> {
    let contents = read_file(path)?;
    let process = serde_json::from_str::<Process>(&contents)
        .map_err(|e| Error::parse(Some(path.to_path_buf()), e))?;

    let elements = process.elements();
    debug!(
        path = %path.display(),
        events = elements.events.len(),
        activities = elements.activities.len(),
        gateways = elements.gateways.len(),
        flows = elements.sequence_flows.len(),
        "loaded process"
    );
    Ok(process)
}

/// Decode a process document held in memory
pub fn parse_process(contents: &str) -> Result<Process> {
    serde_json::from_str(contents).map_err(|e| Error::parse(None, e))
}
