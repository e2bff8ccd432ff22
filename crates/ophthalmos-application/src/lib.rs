//! Application layer for ophthalmos.
//!
//! # Module Structure
//!
//! - `vision_usecase`: account, cone test, adaptation and statistics flows
//!   with graceful degradation when the backend is unavailable
//! - `game_controller`: owns a game session and drives its countdown

pub mod game_controller;
pub mod vision_usecase;

pub use game_controller::{GameController, TICK_INTERVAL};
pub use vision_usecase::VisionUseCase;
