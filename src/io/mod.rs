pub mod loader;
pub mod output;

pub use loader::{load_process, parse_process};
pub use output::{create_writer, JsonWriter, OutputFormat, OutputWriter, TextWriter};

use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::io(path, e))
}
