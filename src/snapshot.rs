//! Engine state capture.
//!
//! A snapshot is plain data: ids, names, ordered card lists, props, and
//! the random-stream state. It contains everything needed to reproduce
//! an engine's future draws and zone contents, and nothing else - card
//! definitions are content data shipped separately, so a restored
//! engine starts with an empty definition registry and the caller
//! re-registers content before play resumes.
//!
//! Card lists are sorted by id and pile contents keep zone order, so
//! equal game states compare and serialize identically regardless of
//! hash-map iteration order.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardRegistry};
use crate::core::{Player, PlayerId, PlayerRegistry, PropMap, RandomService, RngState};
use crate::engine::CardEngine;
use crate::piles::PileManager;

/// Captured state of one pile: name, owner, and ordered contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PileSnapshot {
    /// The pile's name.
    pub name: String,
    /// The owning player, if any.
    pub owner: Option<PlayerId>,
    /// Ordered contents, bottom/left first.
    pub cards: Vec<CardId>,
}

/// Replayable state of a [`CardEngine`].
///
/// Two engines with equal snapshots behave identically under identical
/// operation sequences, random draws included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Random-stream state: seed plus position.
    pub rng: RngState,
    /// All players, in join order.
    pub players: Vec<Player>,
    /// All live cards, sorted by id.
    pub cards: Vec<Card>,
    /// All piles, in registration order.
    pub piles: Vec<PileSnapshot>,
    /// Engine-wide properties.
    pub props: PropMap,
}

impl EngineSnapshot {
    /// Capture an engine's replayable state.
    #[must_use]
    pub fn capture(engine: &CardEngine) -> Self {
        let mut cards: Vec<Card> = engine.cards().copied().collect();
        cards.sort_by_key(|c| c.id.raw());

        let piles = engine
            .piles()
            .iter()
            .map(|p| PileSnapshot {
                name: p.name().to_string(),
                owner: p.owner(),
                cards: p.to_vec(),
            })
            .collect();

        Self {
            rng: engine.rng().state(),
            players: engine.players().to_vec(),
            cards,
            piles,
            props: engine.props().clone(),
        }
    }

    /// Rebuild an engine from this snapshot.
    ///
    /// The definition registry comes back empty; re-register content
    /// before resuming play.
    #[must_use]
    pub fn restore(&self) -> CardEngine {
        let mut players = PlayerRegistry::new();
        for player in &self.players {
            players.add(player.clone());
        }

        let mut piles = PileManager::new();
        for pile in &self.piles {
            piles.restore_pile(pile.name.clone(), pile.owner, &pile.cards);
        }

        CardEngine::assemble(
            CardRegistry::restore(self.cards.iter().copied()),
            players,
            piles,
            self.props.clone(),
            RandomService::from_state(&self.rng),
        )
    }
}
