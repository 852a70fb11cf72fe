//! Writes rendered text to the output folder.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::error::{GenError, Result};
use crate::options::Options;

/// Either one file per logical unit, or every unit appended to one file.
#[derive(Debug, Clone)]
pub struct FileEmitter {
    output_dir: PathBuf,
    prefix: String,
    single_file: Option<String>,
}

impl FileEmitter {
    /// Per-unit emitter writing `<output_dir>/<prefix><name>.<ext>`.
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            single_file: None,
        }
    }

    /// Emitter for the configured folder, prefix and single-file mode.
    pub fn from_options(options: &Options) -> Self {
        Self {
            output_dir: options.output_folder.clone(),
            prefix: options.output_prefix.clone(),
            single_file: options.single_file().map(str::to_string),
        }
    }

    /// Append everything to `name` inside the output folder.
    pub fn with_single_file(mut self, name: impl Into<String>) -> Self {
        self.single_file = Some(name.into());
        self
    }

    /// Path that `emit` writes to for a unit.
    pub fn target_path(&self, logical_name: &str, extension: &str) -> PathBuf {
        match &self.single_file {
            Some(name) => self.output_dir.join(name),
            None => self
                .output_dir
                .join(format!("{}{logical_name}.{extension}", self.prefix)),
        }
    }

    /// Write one rendered unit, creating the output folder first.
    ///
    /// In per-unit mode the file is created or overwritten; in single-file
    /// mode the text is appended.
    pub fn emit(&self, rendered: &str, logical_name: &str, extension: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|err| GenError::io(&self.output_dir, &err))?;

        let path = self.target_path(logical_name, extension);
        if self.single_file.is_some() {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|err| GenError::io(&path, &err))?;
            file.write_all(rendered.as_bytes())
                .map_err(|err| GenError::io(&path, &err))?;
        } else {
            fs::write(&path, rendered).map_err(|err| GenError::io(&path, &err))?;
        }

        info!(path = %path.display(), bytes = rendered.len(), unit = %logical_name, "Wrote file.");
        Ok(path)
    }
}
