//! Domain layer for Ophthalmos.
//!
//! Pure logic for the cone contrast test, color adaptation and the two
//! perception games, plus the traits the outer layers implement to reach the
//! external service.

pub mod adaptation;
pub mod color;
pub mod config;
pub mod cone;
pub mod error;
pub mod game;
pub mod performance;
pub mod user;

// Re-export common types
pub use color::Color;
pub use error::{OphthalmosError, Result};
