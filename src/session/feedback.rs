use anyhow::Result;
use log::info;

use crate::console::Console;
use crate::logs::FeedbackLog;
use crate::models::{ChartKind, FeedbackRecord, ParticipantId, SessionId};

/// Ask the three post-block questions and append the answers as given.
pub fn collect_feedback(
    console: &mut dyn Console,
    chart: ChartKind,
    participant: ParticipantId,
    session_id: &SessionId,
    log: &FeedbackLog,
) -> Result<FeedbackRecord> {
    let name = chart.display_name();
    console.say(&format!("\nPlease provide feedback for the {name} charts: \n"))?;
    let confidence = console.ask(&format!(
        "On a scale of 1-10, how would you rate your confidence of reading {name}s before you took this test? "
    ))?;
    let rating = console.ask(&format!(
        "On a scale of 1-10, how would you rate the {name}s for clarity? "
    ))?;
    let comments = console.ask(&format!(
        "Please provide any additional comments on the {name}s: "
    ))?;

    let record = FeedbackRecord {
        session_id: session_id.clone(),
        participant,
        chart,
        confidence,
        rating,
        comments,
    };
    log.append(&record)?;
    info!("Recorded {name} feedback for participant {participant}");
    Ok(record)
}
