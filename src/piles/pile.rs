//! A single ordered zone.
//!
//! Position encodes board-relevant order: index 0 is the leftmost card
//! of a hand and the bottommost card of a deck; the top of a deck is
//! the last index. A pile stores card ids only - the cards themselves
//! live in the engine's card registry, and the reverse index that
//! answers "which pile holds this card" lives in the pile manager.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

/// Handle for a pile registered with a [`super::PileManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u32);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// An ordered zone of cards (deck, hand, battlefield, ...).
///
/// The pile is the authoritative container of position. All membership
/// mutation goes through the pile manager so the reverse index stays
/// consistent; only read accessors and position-preserving writers are
/// exposed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    name: String,
    owner: Option<PlayerId>,
    cards: Vec<CardId>,
}

impl Pile {
    pub(crate) fn new(name: impl Into<String>, owner: Option<PlayerId>) -> Self {
        Self {
            name: name.into(),
            owner,
            cards: Vec::new(),
        }
    }

    /// The pile's name; identity for by-name lookup.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning player, if any.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The ordered contents, bottom/left first.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Card at an index; `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardId> {
        self.cards.get(index).copied()
    }

    /// The top card (last index); `None` when empty.
    #[must_use]
    pub fn top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Position of a card in this pile; `None` when absent.
    #[must_use]
    pub fn index_of(&self, card: CardId) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    /// Check whether this pile contains a card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.index_of(card).is_some()
    }

    /// Copy of the inclusive range `[start, end]`.
    ///
    /// `None` when the range exceeds the pile, matching the crate's
    /// non-throwing lookup style.
    #[must_use]
    pub fn range(&self, start: usize, end: usize) -> Option<Vec<CardId>> {
        self.cards.get(start..=end).map(<[CardId]>::to_vec)
    }

    /// Snapshot of the contents as a plain sequence (not a live view).
    #[must_use]
    pub fn to_vec(&self) -> Vec<CardId> {
        self.cards.clone()
    }

    // Positional writers below are zone-internal: they change order,
    // not membership, so the manager's reverse index is unaffected.

    pub(crate) fn insert_at(&mut self, index: usize, card: CardId) {
        self.cards.insert(index, card);
    }

    pub(crate) fn push(&mut self, card: CardId) {
        self.cards.push(card);
    }

    /// Remove a card by value; returns its former index.
    pub(crate) fn remove_card(&mut self, card: CardId) -> Option<usize> {
        let index = self.index_of(card)?;
        self.cards.remove(index);
        Some(index)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> CardId {
        self.cards.remove(index)
    }

    pub(crate) fn set_at(&mut self, index: usize, card: CardId) {
        self.cards[index] = card;
    }

    /// Overwrite the range starting at `start` positionally.
    pub(crate) fn set_range(&mut self, start: usize, cards: &[CardId]) {
        self.cards[start..start + cards.len()].copy_from_slice(cards);
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.cards.swap(a, b);
    }
}
