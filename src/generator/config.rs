use crate::models::calendar::{AUGUST, DECEMBER, JULY};

/// Numeric constraints for synthetic absence data.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Inclusive upper bound for a regular month.
    pub regular_max: u32,

    /// Inclusive upper bound for partially tracked months
    pub partial_max: u32,
    pub partial_months: Vec<usize>,

    /// Months forced to zero. Never asked about.
    pub holiday_months: Vec<usize>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            regular_max: 236,
            partial_max: 118,
            partial_months: vec![JULY, DECEMBER],
            holiday_months: vec![AUGUST],
        }
    }
}

impl GenerationConfig {
    /// Months a question may target: every column except the holidays.
    pub fn question_months(&self, num_months: usize) -> Vec<usize> {
        (0..num_months)
            .filter(|month| !self.holiday_months.contains(month))
            .collect()
    }
}
