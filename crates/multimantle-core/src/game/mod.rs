//! Game engine and session registry.
//!
//! - [`Game`]: state machine for one running game (secret, guesses,
//!   players, mode) and the simultaneous-round logic
//! - [`GameRegistry`]: maps session ids to active games

mod engine;
mod registry;
mod round;

pub use engine::Game;
pub use registry::{GameRegistry, SharedGame};
