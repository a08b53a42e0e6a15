pub mod config;
pub mod dataset;
pub mod question;

pub use config::GenerationConfig;
pub use dataset::generate;
pub use question::pick_question;
