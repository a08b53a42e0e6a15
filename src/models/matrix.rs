use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Absence counts for one trial: one row per school, one column per month.
///
/// Built once by the generator and never mutated afterwards. Serializes as a
/// plain nested array (`[[12,0,...],[...]]`), which is the encoding stored in
/// the `GeneratedData` log column. Parsing goes through [`AbsenceMatrix::from_rows`],
/// so empty and ragged grids are rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct AbsenceMatrix {
    rows: Vec<Vec<u32>>,
}

impl AbsenceMatrix {
    /// Build a matrix from school rows. Every row must have the same,
    /// non-zero number of months.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            bail!("absence matrix needs at least one school");
        };
        let months = first.len();
        if months == 0 {
            bail!("absence matrix needs at least one month");
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != months) {
            bail!(
                "school {} has {} months, expected {}",
                index + 1,
                row.len(),
                months
            );
        }
        Ok(Self { rows })
    }

    pub fn num_schools(&self) -> usize {
        self.rows.len()
    }

    pub fn num_months(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Absences for a 0-based school row and month column.
    pub fn get(&self, school: usize, month: usize) -> Option<u32> {
        self.rows.get(school).and_then(|row| row.get(month)).copied()
    }

    /// All schools' values for one month, in school order.
    pub fn month_column(&self, month: usize) -> Option<Vec<u32>> {
        if month >= self.num_months() {
            return None;
        }
        Some(self.rows.iter().map(|row| row[month]).collect())
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    pub fn max_value(&self) -> u32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn min_value(&self) -> u32 {
        self.rows.iter().flatten().copied().min().unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl TryFrom<Vec<Vec<u32>>> for AbsenceMatrix {
    type Error = anyhow::Error;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<AbsenceMatrix> for Vec<Vec<u32>> {
    fn from(matrix: AbsenceMatrix) -> Self {
        matrix.rows
    }
}
