use crate::model::Chapter;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Indentation used for the result file
const INDENT: &[u8] = b"    ";

/// Writes chapters as an indented JSON array
#[derive(Debug, Clone)]
pub struct JsonOutputHandler {
    path: PathBuf,
}

impl JsonOutputHandler {
    /// Creates a handler writing to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this handler writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write(&self, chapters: &[Chapter]) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path).map_err(|source| OutputError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        write_pretty(&mut writer, chapters)?;
        writer.flush()?;

        tracing::info!(
            "Wrote {} chapters to {}",
            chapters.len(),
            self.path.display()
        );
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes chapters as JSON with four-space indentation
fn write_pretty<W: Write>(writer: W, chapters: &[Chapter]) -> OutputResult<()> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    chapters.serialize(&mut serializer)?;
    Ok(())
}
