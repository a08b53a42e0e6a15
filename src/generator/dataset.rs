use rand::Rng;

use crate::generator::config::GenerationConfig;
use crate::models::AbsenceMatrix;

/// Draw one absence matrix.
///
/// Every cell is an independent uniform draw from `0..=regular_max`. Partial
/// months are then redrawn from `0..=partial_max` and holiday months zeroed.
/// Columns named by the config that fall outside `num_months` are ignored.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    num_schools: usize,
    num_months: usize,
    config: &GenerationConfig,
) -> anyhow::Result<AbsenceMatrix> {
    let mut rows: Vec<Vec<u32>> = (0..num_schools)
        .map(|_| {
            (0..num_months)
                .map(|_| rng.gen_range(0..=config.regular_max))
                .collect()
        })
        .collect();

    for &month in config.partial_months.iter().filter(|&&m| m < num_months) {
        for row in rows.iter_mut() {
            row[month] = rng.gen_range(0..=config.partial_max);
        }
    }

    for &month in config.holiday_months.iter().filter(|&&m| m < num_months) {
        for row in rows.iter_mut() {
            row[month] = 0;
        }
    }

    AbsenceMatrix::from_rows(rows)
}
