use std::path::PathBuf;

use anyhow::Result;

use super::CsvLog;
use crate::models::FeedbackRecord;

pub const FEEDBACK_HEADER: &[&str] = &[
    "SessionID",
    "UserNumber",
    "ChartType",
    "Confidence",
    "Rating",
    "Comments",
];

/// One row per chart condition per participant.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    inner: CsvLog,
}

impl FeedbackLog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CsvLog::open(path, FEEDBACK_HEADER)?,
        })
    }

    pub fn csv(&self) -> &CsvLog {
        &self.inner
    }

    pub fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let participant = record.participant.to_string();
        self.inner.append_row([
            record.session_id.as_str(),
            participant.as_str(),
            record.chart.display_name(),
            record.confidence.as_str(),
            record.rating.as_str(),
            record.comments.as_str(),
        ])
    }
}
