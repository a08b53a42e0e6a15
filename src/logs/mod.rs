//! Append-only CSV logs.
//!
//! Each log is a single file with one header row, written only while the file
//! is empty, followed by one row per record. Rows are encoded in memory and
//! written with a single `write_all` so a killed process never leaves half a row.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;

mod feedback;
mod helpers;
mod trials;

pub use feedback::{FeedbackLog, FEEDBACK_HEADER};
pub use helpers::{format_correct_schools, format_response_secs, verdict};
pub use trials::{TrialLog, TRIAL_HEADER};

#[derive(Debug, Clone)]
pub struct CsvLog {
    path: PathBuf,
    header: &'static [&'static str],
}

impl CsvLog {
    /// Open (creating if needed) the log at `path` and make sure its header is present.
    pub fn open(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Result<Self> {
        let log = Self {
            path: path.into(),
            header,
        };
        log.ensure_header()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header iff the file is empty. Returns whether it was written.
    pub fn ensure_header(&self) -> Result<bool> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut file = self.open_append()?;
        let len = file
            .metadata()
            .with_context(|| format!("failed to stat {}", self.path.display()))?
            .len();
        if len > 0 {
            return Ok(false);
        }

        let bytes = encode_row(self.header.iter().copied())?;
        file.write_all(&bytes)
            .with_context(|| format!("failed to write header to {}", self.path.display()))?;
        file.flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;
        info!("Initialised log {}", self.path.display());
        Ok(true)
    }

    pub fn append_row<I, S>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let bytes = encode_row(fields)?;
        let mut file = self.open_append()?;
        file.write_all(&bytes)
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        file.flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))
    }

    fn open_append(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))
    }
}

fn encode_row<I, S>(fields: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields).context("failed to encode CSV row")?;
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to finish CSV row: {}", err.error()))
}
