//! CLI command implementations.

mod config;
mod grade;
mod quiz;
mod serve;

pub use config::run_config;
pub use grade::run_grade;
pub use quiz::run_quiz;
pub use serve::run_serve;
