pub mod runner;
pub mod timer;

pub use runner::{StudyIo, TrialRunner};
pub use timer::{ResponseTimer, TimerStatus};
