use std::path::PathBuf;

use anyhow::Result;

use super::helpers::{format_correct_schools, format_response_secs, optional_cell, verdict};
use super::CsvLog;
use crate::models::TrialRecord;

pub const TRIAL_HEADER: &[&str] = &[
    "SessionID",
    "UserNumber",
    "Trial",
    "Month",
    "ChartType",
    "QuestionType",
    "UserAnswer",
    "CorrectSchool",
    "CorrectAbsences",
    "UserAbsences",
    "ResponseTime",
    "Correct",
    "GeneratedData",
];

/// One row per trial, never rewritten.
#[derive(Debug, Clone)]
pub struct TrialLog {
    inner: CsvLog,
}

impl TrialLog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CsvLog::open(path, TRIAL_HEADER)?,
        })
    }

    pub fn csv(&self) -> &CsvLog {
        &self.inner
    }

    pub fn append(&self, record: &TrialRecord) -> Result<()> {
        self.inner.append_row(trial_row(record)?)
    }
}

fn trial_row(record: &TrialRecord) -> Result<Vec<String>> {
    Ok(vec![
        record.session_id.to_string(),
        record.participant.to_string(),
        record.trial.to_string(),
        record.question.month_name(),
        record.chart.trial_label().to_string(),
        record.question.polarity.as_str().to_string(),
        record.answer.clone(),
        format_correct_schools(&record.result.correct_school_ids),
        record.result.correct_absence_value.to_string(),
        optional_cell(record.result.user_absence_value),
        format_response_secs(record.response_secs),
        verdict(record.result.is_correct).to_string(),
        record.matrix.to_json()?,
    ])
}
