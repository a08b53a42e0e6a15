use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::render::DismissPolicy;

pub const SETTINGS_ENV_VAR: &str = "CHART_STUDY_SETTINGS";
const DEFAULT_SETTINGS_FILE: &str = "chart_study.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub dismiss: DismissPolicy,
    /// Blank screen after each answer; 0 disables it.
    pub blank_after_answer_millis: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dismiss: DismissPolicy::default(),
            blank_after_answer_millis: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudySettings {
    pub trial_log_path: PathBuf,
    pub feedback_log_path: PathBuf,
    pub diagnostics_log_path: Option<PathBuf>,
    pub trials_per_block: usize,
    pub num_schools: usize,
    pub num_months: usize,
    pub max_participants: u32,
    pub seed: Option<u64>,
    pub display: DisplaySettings,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            trial_log_path: PathBuf::from("user_data.csv"),
            feedback_log_path: PathBuf::from("user_feedback.csv"),
            diagnostics_log_path: Some(PathBuf::from("chart_study.log")),
            trials_per_block: 10,
            num_schools: 10,
            num_months: 12,
            max_participants: 10,
            seed: None,
            display: DisplaySettings::default(),
        }
    }
}

impl StudySettings {
    pub fn validate(&self) -> Result<()> {
        if self.trials_per_block == 0 {
            bail!("trials_per_block must be greater than zero");
        }
        if self.num_schools == 0 {
            bail!("num_schools must be greater than zero");
        }
        if self.num_months == 0 {
            bail!("num_months must be greater than zero");
        }
        if self.max_participants == 0 {
            bail!("max_participants must be greater than zero");
        }
        Ok(())
    }

    pub fn blank_after_answer(&self) -> Duration {
        Duration::from_millis(self.display.blank_after_answer_millis)
    }

    /// Seeded generator when `seed` is set, entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Where the loaded settings came from, reported once logging is up.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
    File,
    Missing,
    Unparsable(String),
}

pub struct SettingsStore {
    path: PathBuf,
    source: SettingsSource,
    data: StudySettings,
}

impl SettingsStore {
    /// `$CHART_STUDY_SETTINGS`, or `chart_study.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (data, source) = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(data) => (data, SettingsSource::File),
                Err(err) => (
                    StudySettings::default(),
                    SettingsSource::Unparsable(err.to_string()),
                ),
            }
        } else {
            (StudySettings::default(), SettingsSource::Missing)
        };

        Ok(Self { path, source, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &SettingsSource {
        &self.source
    }

    pub fn settings(&self) -> &StudySettings {
        &self.data
    }
}
