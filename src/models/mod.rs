pub mod calendar;
pub mod feedback;
pub mod matrix;
pub mod session;
pub mod trial;

pub use calendar::{month_name, AUGUST, DECEMBER, JULY, MONTH_NAMES};
pub use feedback::FeedbackRecord;
pub use matrix::AbsenceMatrix;
pub use session::{ParticipantId, SessionId};
pub use trial::{ChartKind, CorrectnessResult, Polarity, TrialQuestion, TrialRecord};
