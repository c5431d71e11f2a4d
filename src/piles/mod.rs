//! Piles - ordered card zones and the manager that mutates them.
//!
//! ## Key Types
//!
//! - `PileId` / `Pile`: a named, optionally player-owned ordered zone
//! - `Position`: where in a zone's sequence an insertion lands
//! - `PileManager`: the only mutation path for zone membership; keeps
//!   the `card -> pile` reverse index consistent with the sequences

pub mod manager;
pub mod pile;

pub use manager::{PileManager, Position};
pub use pile::{Pile, PileId};
