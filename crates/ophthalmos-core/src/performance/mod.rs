//! Performance results of finished games.

mod model;
mod repository;
mod stats;

pub use model::{DEFAULT_DIFFICULTY, PerformanceResult, Rating};
pub use repository::PerformanceRepository;
pub use stats::PerformanceStats;
