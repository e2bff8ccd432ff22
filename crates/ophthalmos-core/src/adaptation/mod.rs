//! Color adaptation domain module.
//!
//! Adjustment factors come from an external recommendation service keyed by
//! a sensitivity profile; this module only applies them.

mod model;
mod service;
mod simulator;
mod transform;

pub use model::AdaptationFactors;
pub use service::AdaptationService;
pub use simulator::{ColorSimulator, NamedColor, SAMPLE_PALETTE};
pub use transform::adapt;
