use super::session::{ParticipantId, SessionId};
use super::trial::ChartKind;

/// Subjective responses for one chart condition. Ratings are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub session_id: SessionId,
    pub participant: ParticipantId,
    pub chart: ChartKind,
    pub confidence: String,
    pub rating: String,
    pub comments: String,
}
