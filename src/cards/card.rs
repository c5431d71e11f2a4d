//! Live card instances.
//!
//! A `Card` is a specific copy of a definition in one game. It carries
//! its engine-scoped id and the id of the definition it was created
//! from. Which pile currently holds it is **not** stored here: pile
//! membership is the single source of truth, and the pile manager's
//! reverse index answers "where is this card" (see `piles::PileManager`).
//! That removes the classic dual-update hazard of a mutable back-pointer.

use serde::{Deserialize, Serialize};

use super::define::DefineId;

/// Identifier for a card instance, unique within one engine.
///
/// Ids are positive; the engine allocates the smallest unused one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A live card bound to exactly one definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Engine-scoped instance identity.
    pub id: CardId,
    /// The definition this card was created from. Shared and read-only
    /// from the card's perspective.
    pub define: DefineId,
}

impl Card {
    /// Create a card bound to a definition.
    #[must_use]
    pub const fn new(id: CardId, define: DefineId) -> Self {
        Self { id, define }
    }
}
