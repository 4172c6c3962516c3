//! Match domain: moves, winner determination and the match state machine.

pub mod types;
pub mod error;
pub mod rules;
pub mod state;
