pub mod controller;
pub mod counterbalance;
pub mod feedback;

pub use controller::{SessionController, SessionOutcome, SessionPhase};
pub use counterbalance::block_order;
pub use feedback::collect_feedback;
