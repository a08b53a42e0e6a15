use crate::models::{ChartKind, ParticipantId};

/// Fixed within-participant order: the lower half of the participant range
/// sees scatter plots first, the upper half heatmaps first.
pub fn block_order(participant: ParticipantId, max_participants: u32) -> [ChartKind; 2] {
    if u64::from(participant.get()) * 2 <= u64::from(max_participants) {
        [ChartKind::Scatter, ChartKind::Heatmap]
    } else {
        [ChartKind::Heatmap, ChartKind::Scatter]
    }
}
