//! Stimulus display.
//!
//! The trial engine only sees [`ChartRenderer`]. Presentation constants live in
//! [`ChartStyle`] and are handed to the renderer when it is built.

pub mod heatmap;
pub mod scatter;
pub mod style;
pub mod terminal;

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{AbsenceMatrix, ChartKind};

pub use style::ChartStyle;
pub use terminal::TerminalRenderer;

/// How long a rendered chart stays on screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DismissPolicy {
    /// Fixed exposure, then the chart is taken down.
    Pause { millis: u64 },
    /// Stay up until a key is pressed.
    UntilKeypress,
}

impl Default for DismissPolicy {
    fn default() -> Self {
        DismissPolicy::Pause { millis: 1000 }
    }
}

pub trait ChartRenderer {
    /// Put `matrix` on screen as `kind`. Failure is fatal for the trial.
    fn render(&mut self, matrix: &AbsenceMatrix, kind: ChartKind) -> Result<()>;

    /// Hold the chart according to the dismiss policy, then release the screen.
    fn dismiss(&mut self) -> Result<()>;

    /// Show an empty screen for `duration`.
    fn blank(&mut self, duration: Duration) -> Result<()>;
}
