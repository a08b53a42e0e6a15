use rand::Rng;

use crate::generator::config::GenerationConfig;
use crate::models::{Polarity, TrialQuestion};

/// Pick a month uniformly among the askable months and a polarity uniformly.
pub fn pick_question<R: Rng + ?Sized>(
    rng: &mut R,
    num_months: usize,
    config: &GenerationConfig,
) -> anyhow::Result<TrialQuestion> {
    let months = config.question_months(num_months);
    if months.is_empty() {
        anyhow::bail!("no askable months among {num_months} columns");
    }
    let month = months[rng.gen_range(0..months.len())];
    let polarity = if rng.gen_bool(0.5) {
        Polarity::Highest
    } else {
        Polarity::Lowest
    };
    Ok(TrialQuestion::new(month, polarity))
}
