//! Pile manager: ordered zones plus the card-location reverse index.
//!
//! Membership is kept consistent by construction: every operation that
//! changes which pile a card sits in goes through this manager, which
//! updates the pile's ordered sequence and the `card -> pile` reverse
//! index together. A card is therefore in at most one pile at any
//! observation point, and `pile_of` always agrees with the sequences.
//!
//! Operations that involve chance take the engine's [`RandomService`]
//! explicitly; there is no other randomness source, so outcomes are
//! replayable from the seed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{EngineError, PlayerId, RandomService};

use super::pile::{Pile, PileId};

/// Where to place a card in a pile's ordered sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// Index 0 (deck bottom, hand leftmost).
    Bottom,
    /// After the last card (deck top).
    Top,
    /// Specific index, clamped to the sequence length.
    Index(usize),
}

impl Position {
    fn resolve(self, len: usize) -> usize {
        match self {
            Position::Bottom => 0,
            Position::Top => len,
            Position::Index(i) => i.min(len),
        }
    }
}

/// Owns the engine's piles and tracks card locations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileManager {
    piles: Vec<Pile>,
    locations: FxHashMap<CardId, PileId>,
}

impl PileManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty pile. Names are not deduplicated; by-name
    /// lookup returns the first match.
    pub fn add_pile(&mut self, name: impl Into<String>, owner: Option<PlayerId>) -> PileId {
        let id = PileId::new(self.piles.len() as u32);
        self.piles.push(Pile::new(name, owner));
        id
    }

    /// First pile with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PileId> {
        self.piles
            .iter()
            .position(|p| p.name() == name)
            .map(|i| PileId::new(i as u32))
    }

    /// The pile behind a handle.
    ///
    /// Panics on a handle that this manager never issued.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    /// All piles, in registration order.
    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    /// Which pile currently holds a card; `None` when unowned.
    #[must_use]
    pub fn pile_of(&self, card: CardId) -> Option<PileId> {
        self.locations.get(&card).copied()
    }

    /// Check whether any pile holds this card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }

    pub(crate) fn set_owner(&mut self, id: PileId, owner: Option<PlayerId>) {
        self.piles[id.index()].set_owner(owner);
    }

    /// Insert a card that belongs to no pile.
    ///
    /// Fails with [`EngineError::AlreadyOwned`] (naming the owning pile)
    /// when the card is anywhere else; never silently reassigns. Both
    /// piles are left untouched on failure.
    pub fn insert(
        &mut self,
        card: CardId,
        pile: PileId,
        position: Position,
    ) -> Result<(), EngineError> {
        if let Some(holder) = self.pile_of(card) {
            return Err(EngineError::AlreadyOwned {
                card,
                pile: self.pile(holder).name().to_string(),
            });
        }
        let at = position.resolve(self.piles[pile.index()].len());
        self.piles[pile.index()].insert_at(at, card);
        self.locations.insert(card, pile);
        Ok(())
    }

    /// Move one card from `from` to `to`.
    ///
    /// Returns `false` without touching anything when the card is not
    /// in `from` - the caller asked to move a card from a pile that
    /// does not hold it, which game flow treats as "nothing to do"
    /// rather than a fault.
    pub fn move_to(&mut self, card: CardId, from: PileId, to: PileId, position: Position) -> bool {
        if self.piles[from.index()].remove_card(card).is_none() {
            return false;
        }
        let at = position.resolve(self.piles[to.index()].len());
        self.piles[to.index()].insert_at(at, card);
        self.locations.insert(card, to);
        true
    }

    /// Move a batch of cards from `from` to `to` as one block.
    ///
    /// Cards not found in `from` are skipped. The matched cards are all
    /// removed first and then inserted contiguously at `position`, so
    /// the block's internal order equals the cards' relative order in
    /// `cards`. Returns how many cards moved.
    pub fn move_all(
        &mut self,
        cards: &[CardId],
        from: PileId,
        to: PileId,
        position: Position,
    ) -> usize {
        let mut moved: SmallVec<[CardId; 8]> = SmallVec::new();
        for &card in cards {
            if self.piles[from.index()].remove_card(card).is_some() {
                moved.push(card);
            }
        }
        let at = position.resolve(self.piles[to.index()].len());
        for (offset, &card) in moved.iter().enumerate() {
            self.piles[to.index()].insert_at(at + offset, card);
            self.locations.insert(card, to);
        }
        moved.len()
    }

    /// Pairwise swap: for each index `i`, the card at `originals[i]`'s
    /// position in `pile` and the card at `replacements[i]`'s position
    /// in *its own* pile exchange positions and containing piles.
    ///
    /// Pairs are resolved independently in order: each replacement's
    /// pile is looked up dynamically, so replacements need not come
    /// from a single pile and may even sit in `pile` itself.
    ///
    /// Fails with [`EngineError::LengthMismatch`] on uneven arrays,
    /// [`EngineError::NotInPile`] when an original is missing from
    /// `pile`, and [`EngineError::NotInAnyPile`] when a replacement is
    /// unowned. Pairs before the failing one stay swapped.
    pub fn replace(
        &mut self,
        pile: PileId,
        originals: &[CardId],
        replacements: &[CardId],
    ) -> Result<(), EngineError> {
        if originals.len() != replacements.len() {
            return Err(EngineError::LengthMismatch {
                originals: originals.len(),
                replacements: replacements.len(),
            });
        }
        for (&orig, &repl) in originals.iter().zip(replacements) {
            let orig_index =
                self.piles[pile.index()]
                    .index_of(orig)
                    .ok_or_else(|| EngineError::NotInPile {
                        card: orig,
                        pile: self.pile(pile).name().to_string(),
                    })?;
            let repl_pile = self.pile_of(repl).ok_or(EngineError::NotInAnyPile(repl))?;
            let repl_index = self.piles[repl_pile.index()].index_of(repl).ok_or_else(|| {
                EngineError::NotInPile {
                    card: repl,
                    pile: self.pile(repl_pile).name().to_string(),
                }
            })?;

            if repl_pile == pile {
                self.piles[pile.index()].swap(orig_index, repl_index);
            } else {
                self.piles[pile.index()].set_at(orig_index, repl);
                self.piles[repl_pile.index()].set_at(repl_index, orig);
                self.locations.insert(orig, repl_pile);
                self.locations.insert(repl, pile);
            }
        }
        Ok(())
    }

    /// Replace `originals` in `pile` with random cards drawn from
    /// `source`, using the engine's random service exclusively.
    ///
    /// Two draw policies:
    /// - `shuffle_back = true`: the originals are first placed into
    ///   `source` (so they are candidates and may draw themselves
    ///   back); each freed slot is then filled by a uniform draw from
    ///   the shrinking `source`.
    /// - `shuffle_back = false`: `originals.len()` distinct cards are
    ///   drawn from `source` via a shrinking index list (the originals
    ///   cannot come back), then swapped in with one [`Self::replace`].
    ///
    /// `originals` must be distinct cards all present in `pile`. The
    /// source must be a different pile; naming the receiver as its own
    /// draw source fails with [`EngineError::SameSourcePile`] - both
    /// policies would corrupt membership otherwise.
    pub fn replace_by_random(
        &mut self,
        pile: PileId,
        originals: &[CardId],
        source: PileId,
        shuffle_back: bool,
        rng: &mut RandomService,
    ) -> Result<(), EngineError> {
        if pile == source {
            return Err(EngineError::SameSourcePile(
                self.pile(pile).name().to_string(),
            ));
        }
        if shuffle_back {
            // Record the freed slots before membership changes.
            let mut slots: SmallVec<[usize; 8]> = SmallVec::new();
            for &card in originals {
                let slot = self.piles[pile.index()]
                    .index_of(card)
                    .ok_or_else(|| EngineError::NotInPile {
                        card,
                        pile: self.pile(pile).name().to_string(),
                    })?;
                slots.push(slot);
            }
            // Shuffle the originals back into the source; their old
            // slots keep stale ids until they are overwritten below.
            for &card in originals {
                self.piles[source.index()].push(card);
                self.locations.insert(card, source);
            }
            for &slot in &slots {
                let source_len = self.piles[source.index()].len();
                let target = rng.random_int(0, source_len as i32 - 1) as usize;
                let picked = self.piles[source.index()].remove_at(target);
                self.piles[pile.index()].set_at(slot, picked);
                self.locations.insert(picked, pile);
            }
            Ok(())
        } else {
            let requested = originals.len();
            let available = self.piles[source.index()].len();
            if available < requested {
                return Err(EngineError::NotEnoughCards {
                    pile: self.pile(source).name().to_string(),
                    available,
                    requested,
                });
            }
            // The source stays untouched until the final replace call,
            // so a snapshot of its contents is draw-stable.
            let pool = self.piles[source.index()].to_vec();
            let mut index_list: Vec<usize> = (0..available).collect();
            let mut replacements: SmallVec<[CardId; 8]> = SmallVec::new();
            for _ in 0..requested {
                let pick = rng.random_int(0, index_list.len() as i32 - 1) as usize;
                replacements.push(pool[index_list.remove(pick)]);
            }
            self.replace(pile, originals, &replacements)
        }
    }

    /// In-place Fisher-Yates shuffle driven by the engine RNG.
    ///
    /// Each position `i` swaps with `random_int(i, count - 1)`; the
    /// inclusive upper bound is part of the replay contract.
    pub fn shuffle(&mut self, pile: PileId, rng: &mut RandomService) {
        let mut cards = self.piles[pile.index()].to_vec();
        let count = cards.len();
        for i in 0..count {
            let j = rng.random_int(i as i32, count as i32 - 1) as usize;
            cards.swap(i, j);
        }
        self.piles[pile.index()].set_range(0, &cards);
    }

    /// Remove a card from whichever pile holds it.
    ///
    /// No-op (returns `false`) when the card is unowned.
    pub fn remove(&mut self, card: CardId) -> bool {
        match self.locations.remove(&card) {
            Some(holder) => {
                self.piles[holder.index()].remove_card(card);
                true
            }
            None => false,
        }
    }

    /// Rebuild one pile from captured state, reindexing its cards.
    pub(crate) fn restore_pile(
        &mut self,
        name: impl Into<String>,
        owner: Option<PlayerId>,
        cards: &[CardId],
    ) {
        let id = self.add_pile(name, owner);
        for &card in cards {
            self.piles[id.index()].push(card);
            self.locations.insert(card, id);
        }
    }

    /// Debugging aid: verify the reverse index agrees with the pile
    /// sequences and that no card appears twice.
    #[must_use]
    pub fn check_consistency(&self) -> bool {
        let mut seen: FxHashMap<CardId, PileId> = FxHashMap::default();
        for (index, pile) in self.piles.iter().enumerate() {
            let id = PileId::new(index as u32);
            for &card in pile.cards() {
                if seen.insert(card, id).is_some() {
                    return false; // card in two piles
                }
                if self.pile_of(card) != Some(id) {
                    return false; // reverse index disagrees
                }
            }
        }
        self.locations.len() == seen.len()
    }
}
