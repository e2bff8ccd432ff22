//! Cone contrast test domain module.
//!
//! # Module Structure
//!
//! - `model`: Questions, answers and the resulting sensitivity profile
//! - `questions`: The standard nine-question battery
//! - `scorer`: Answers to profile conversion
//! - `flow`: Step-by-step test runner that guards scoring behind completion
//! - `repository`: Persistence trait for profiles
//!
//! # Usage
//!
//! ```ignore
//! use ophthalmos_core::cone::{standard_questions, score, AnswerSet};
//! ```

mod flow;
mod model;
mod questions;
mod repository;
mod scorer;

// Re-export public API
pub use flow::ConeTest;
pub use model::{AnswerSet, ConeChannel, SensitivityProfile, StimulusOption, TestQuestion};
pub use questions::standard_questions;
pub use repository::ProfileRepository;
pub use scorer::score;
