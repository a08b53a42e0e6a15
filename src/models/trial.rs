use serde::{Deserialize, Serialize};

use super::calendar::month_name;
use super::matrix::AbsenceMatrix;
use super::session::{ParticipantId, SessionId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Scatter,
    Heatmap,
}

impl ChartKind {
    /// Value of the `ChartType` column in the trial log.
    pub fn trial_label(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heat",
        }
    }

    /// Name shown to participants and stored in the feedback log.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter plot",
            ChartKind::Heatmap => "heatmap",
        }
    }

    pub fn other(&self) -> ChartKind {
        match self {
            ChartKind::Scatter => ChartKind::Heatmap,
            ChartKind::Heatmap => ChartKind::Scatter,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    Highest,
    Lowest,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Highest => "highest",
            Polarity::Lowest => "lowest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialQuestion {
    pub month: usize,
    pub polarity: Polarity,
}

impl TrialQuestion {
    pub fn new(month: usize, polarity: Polarity) -> Self {
        Self { month, polarity }
    }

    pub fn month_name(&self) -> String {
        month_name(self.month)
    }

    pub fn prompt(&self) -> String {
        format!(
            "What is the school with the {} value in {}?",
            self.polarity.as_str(),
            self.month_name()
        )
    }
}

/// Outcome of checking one answer against one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectnessResult {
    pub is_correct: bool,
    /// 1-based school ids attaining the extremum, ascending. Ties are all listed.
    pub correct_school_ids: Vec<usize>,
    /// The extremum itself; shared by every tied school.
    pub correct_absence_value: u32,
    /// Value at the participant's school, only when the answer named a real school.
    pub user_absence_value: Option<u32>,
}

/// One row of the trial log.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    pub session_id: SessionId,
    pub participant: ParticipantId,
    /// 1-based position within the block.
    pub trial: usize,
    pub chart: ChartKind,
    pub question: TrialQuestion,
    pub answer: String,
    pub result: CorrectnessResult,
    pub response_secs: f64,
    pub matrix: AbsenceMatrix,
}
