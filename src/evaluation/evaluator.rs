use crate::models::{AbsenceMatrix, CorrectnessResult, Polarity, TrialQuestion};

/// Check a free-text answer against the queried month's extremum.
///
/// Every school tied at the extremum counts as correct. Answers that do not
/// parse as an integer, or that name no school in the matrix, are wrong and
/// carry no user value. The month must be a column of `matrix`.
pub fn evaluate(answer: &str, matrix: &AbsenceMatrix, question: TrialQuestion) -> CorrectnessResult {
    let column = matrix.month_column(question.month).unwrap_or_default();

    let extremum = match question.polarity {
        Polarity::Highest => column.iter().copied().max(),
        Polarity::Lowest => column.iter().copied().min(),
    }
    .unwrap_or(0);

    let correct_school_ids: Vec<usize> = column
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value == extremum)
        .map(|(index, _)| index + 1)
        .collect();

    let chosen = answer
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| usize::try_from(id).ok())
        .filter(|id| (1..=matrix.num_schools()).contains(id));

    let user_absence_value = chosen.and_then(|id| column.get(id - 1).copied());
    let is_correct = chosen.is_some_and(|id| correct_school_ids.contains(&id));

    CorrectnessResult {
        is_correct,
        correct_school_ids,
        correct_absence_value: extremum,
        user_absence_value,
    }
}
