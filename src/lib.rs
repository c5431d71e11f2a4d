//! # card-engine
//!
//! A deterministic rule engine core for trading-card games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded zones, card types, or phases.
//!    Games supply definitions, pile names, and property keys.
//!
//! 2. **Deterministic**: Every random outcome comes from one seeded
//!    stream per engine. Equal seeds plus equal operation sequences
//!    give equal states; [`snapshot::EngineSnapshot`] captures and
//!    resumes the stream mid-game.
//!
//! 3. **Single Source of Truth for Position**: Piles own card order and
//!    the pile manager owns the `card -> pile` reverse index. Cards
//!    carry no back-pointer, so membership cannot go stale.
//!
//! 4. **Instances Over Globals**: A [`engine::CardEngine`] is entirely
//!    self-contained; clone one for AI lookahead or replay checks and
//!    the copies never interfere.
//!
//! ## Modules
//!
//! - `core`: errors, players, property storage, seeded RNG
//! - `cards`: definitions, live instances, and their registries
//! - `effects`: tagged behavior units attached to definitions
//! - `triggers`: event-name resolution boundary for effect lookup
//! - `piles`: ordered zones and the membership-mutating manager
//! - `engine`: the per-game aggregate tying it all together
//! - `snapshot`: plain-data state capture and restore

pub mod cards;
pub mod core;
pub mod effects;
pub mod engine;
pub mod piles;
pub mod snapshot;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    EngineError, Player, PlayerId, PropChange, PropMap, PropValue, RandomService, RngState,
};

pub use crate::cards::{
    Card, CardDefine, CardId, CardRegistry, DefineId, DefineRegistry, UsabilityRule,
};

pub use crate::effects::Effect;

pub use crate::triggers::{EventTag, TriggerManager, TypeNameTriggers};

pub use crate::piles::{Pile, PileId, PileManager, Position};

pub use crate::engine::CardEngine;

pub use crate::snapshot::{EngineSnapshot, PileSnapshot};
