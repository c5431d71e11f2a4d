//! Core engine types: players, seeded randomness, property storage, errors.
//!
//! Everything here is game-agnostic. Games layer their own meaning on
//! top via card definitions, pile names, and property keys.

pub mod error;
pub mod player;
pub mod props;
pub mod rng;

pub use error::EngineError;
pub use player::{Player, PlayerId, PlayerRegistry};
pub use props::{PropChange, PropMap, PropValue};
pub use rng::{RandomService, RngState};
