//! The engine aggregate.
//!
//! A [`CardEngine`] is one self-contained rule-engine instance: its own
//! definition and card registries, players, piles, engine-wide props,
//! and a seeded random service. Nothing is process-global, so several
//! engines (live game, AI lookahead copies, replay verification) run
//! side by side without interference - `Clone` gives an independent
//! copy whose future random draws match the original's.
//!
//! All gameplay mutation goes through this façade; the engine keeps the
//! card registry and the pile manager in step so a card is never listed
//! in a pile after it ceased to exist.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardDefine, CardId, CardRegistry, DefineId, DefineRegistry};
use crate::core::{EngineError, Player, PlayerId, PlayerRegistry, PropMap, RandomService};
use crate::piles::{Pile, PileId, PileManager, Position};
use crate::snapshot::EngineSnapshot;

/// One deterministic rule-engine instance.
///
/// ## Example
///
/// ```
/// use card_engine::cards::{CardDefine, DefineId};
/// use card_engine::engine::CardEngine;
/// use card_engine::piles::Position;
///
/// let mut engine = CardEngine::with_defines(
///     42,
///     vec![CardDefine::new(DefineId::new(1), "servant")],
/// )
/// .unwrap();
///
/// let deck = engine.add_pile("deck", None);
/// let card = engine.create_card(DefineId::new(1)).unwrap();
/// engine.insert_card(card, deck, Position::Top).unwrap();
/// engine.shuffle_pile(deck);
///
/// assert_eq!(engine.pile_of(card), Some(deck));
/// ```
#[derive(Clone, Debug)]
pub struct CardEngine {
    defines: DefineRegistry,
    cards: CardRegistry,
    players: PlayerRegistry,
    piles: PileManager,
    props: PropMap,
    rng: RandomService,
}

impl CardEngine {
    /// Create an engine with the given random seed and no content.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            defines: DefineRegistry::new(),
            cards: CardRegistry::new(),
            players: PlayerRegistry::new(),
            piles: PileManager::new(),
            props: PropMap::new(),
            rng: RandomService::new(seed),
        }
    }

    /// Create an engine preloaded with content definitions.
    ///
    /// Fails on the first conflicting definition id.
    pub fn with_defines(seed: u64, defines: Vec<CardDefine>) -> Result<Self, EngineError> {
        let mut engine = Self::new(seed);
        for define in defines {
            engine.add_define(define)?;
        }
        Ok(engine)
    }

    /// The seed this engine was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // --- definitions -----------------------------------------------------

    /// Register a card definition.
    pub fn add_define(&mut self, define: CardDefine) -> Result<(), EngineError> {
        self.defines.add(define)
    }

    /// Look up a definition by id; missing content is an error.
    pub fn get_define(&self, id: DefineId) -> Result<&CardDefine, EngineError> {
        self.defines.get(id)
    }

    /// First definition with the given type tag.
    pub fn get_define_by_type(&self, card_type: &str) -> Result<&CardDefine, EngineError> {
        self.defines.get_by_type(card_type)
    }

    /// Resolve a batch of definition ids; fails on the first unknown.
    pub fn get_defines(&self, ids: &[DefineId]) -> Result<Vec<&CardDefine>, EngineError> {
        self.defines.get_many(ids)
    }

    /// Hot-reload: replace the mutable fields of the definition with id
    /// `target` by those of `newer`.
    ///
    /// Fails with [`EngineError::MergeIdMismatch`] when `newer` carries
    /// a different id than the definition it is supposed to update, and
    /// with [`EngineError::UnknownDefine`] when `target` is not
    /// registered. Live cards keep referring to `target` and observe
    /// the updated content on their next definition lookup.
    pub fn merge_define(&mut self, target: DefineId, newer: CardDefine) -> Result<(), EngineError> {
        if newer.id != target {
            return Err(EngineError::MergeIdMismatch {
                target,
                newer: newer.id,
            });
        }
        self.defines.merge(newer)
    }

    /// Iterate over all registered definitions (unordered).
    pub fn defines(&self) -> impl Iterator<Item = &CardDefine> {
        self.defines.iter()
    }

    // --- cards -----------------------------------------------------------

    /// Create a live card from a registered definition.
    ///
    /// The new card belongs to no pile until inserted. Ids are the
    /// smallest unused positive integer, so ids freed by
    /// [`Self::remove_card`] get reused.
    pub fn create_card(&mut self, define: DefineId) -> Result<CardId, EngineError> {
        self.defines.get(define)?;
        Ok(self.cards.create(define))
    }

    /// Look up a live card; `None` when no such card exists.
    #[must_use]
    pub fn get_card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Batch card lookup; absent ids yield `None` at their position.
    #[must_use]
    pub fn get_cards(&self, ids: &[CardId]) -> Vec<Option<&Card>> {
        self.cards.get_many(ids)
    }

    /// The definition a live card was created from; `None` when no such
    /// card exists. Creation validated the definition, so it is present
    /// whenever the card is.
    #[must_use]
    pub fn define_of(&self, card: CardId) -> Option<&CardDefine> {
        let card = self.cards.get(card)?;
        self.defines.get(card.define).ok()
    }

    /// Remove a card from the engine entirely: out of its pile (if any)
    /// and out of the registry, freeing its id. Returns `false` when
    /// the card did not exist.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        self.piles.remove(id);
        self.cards.remove(id).is_some()
    }

    /// Number of live cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Iterate over all live cards (unordered).
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    // --- players ---------------------------------------------------------

    /// Register a player, allocating the next id. Join order is stable.
    pub fn add_player(&mut self, name: impl Into<String>) -> PlayerId {
        let id = self.players.new_id();
        self.players.add(Player::new(id, name));
        id
    }

    /// Player by id; `None` when absent.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Player at a join-order index.
    #[must_use]
    pub fn player_at(&self, index: usize) -> Option<&Player> {
        self.players.get_at(index)
    }

    /// Join-order index of a player.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.index_of(id)
    }

    /// All players in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.players.players()
    }

    // --- piles -----------------------------------------------------------

    /// Register a new, empty pile.
    pub fn add_pile(&mut self, name: impl Into<String>, owner: Option<PlayerId>) -> PileId {
        self.piles.add_pile(name, owner)
    }

    /// First pile with the given name.
    #[must_use]
    pub fn find_pile(&self, name: &str) -> Option<PileId> {
        self.piles.find(name)
    }

    /// The pile behind a handle issued by [`Self::add_pile`].
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        self.piles.pile(id)
    }

    /// All piles, in registration order.
    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        self.piles.piles()
    }

    /// Which pile currently holds a card; `None` when unowned.
    #[must_use]
    pub fn pile_of(&self, card: CardId) -> Option<PileId> {
        self.piles.pile_of(card)
    }

    /// Reassign a pile's owning player.
    pub fn set_pile_owner(&mut self, pile: PileId, owner: Option<PlayerId>) {
        self.piles.set_owner(pile, owner);
    }

    /// Insert an unowned card into a pile.
    pub fn insert_card(
        &mut self,
        card: CardId,
        pile: PileId,
        position: Position,
    ) -> Result<(), EngineError> {
        self.piles.insert(card, pile, position)
    }

    /// Move one card between piles; `false` when it was not in `from`.
    pub fn move_card(&mut self, card: CardId, from: PileId, to: PileId, position: Position) -> bool {
        self.piles.move_to(card, from, to, position)
    }

    /// Move a batch of cards as one contiguous block; returns the count
    /// actually moved (cards not in `from` are skipped).
    pub fn move_cards(
        &mut self,
        cards: &[CardId],
        from: PileId,
        to: PileId,
        position: Position,
    ) -> usize {
        self.piles.move_all(cards, from, to, position)
    }

    /// Pairwise-swap `originals` in `pile` with `replacements` from
    /// wherever each replacement currently sits.
    pub fn replace_cards(
        &mut self,
        pile: PileId,
        originals: &[CardId],
        replacements: &[CardId],
    ) -> Result<(), EngineError> {
        self.piles.replace(pile, originals, replacements)
    }

    /// Replace `originals` in `pile` with random draws from `source`,
    /// consuming this engine's random stream.
    pub fn replace_by_random(
        &mut self,
        pile: PileId,
        originals: &[CardId],
        source: PileId,
        shuffle_back: bool,
    ) -> Result<(), EngineError> {
        self.piles
            .replace_by_random(pile, originals, source, shuffle_back, &mut self.rng)
    }

    /// Shuffle a pile in place, consuming this engine's random stream.
    pub fn shuffle_pile(&mut self, pile: PileId) {
        self.piles.shuffle(pile, &mut self.rng);
    }

    /// Debugging aid: verify pile membership bookkeeping.
    #[must_use]
    pub fn check_piles(&self) -> bool {
        self.piles.check_consistency()
    }

    // --- props and randomness --------------------------------------------

    /// Engine-wide ad hoc properties (turn counters, flags, ...).
    #[must_use]
    pub fn props(&self) -> &PropMap {
        &self.props
    }

    /// Mutable access to engine-wide properties.
    pub fn props_mut(&mut self) -> &mut PropMap {
        &mut self.props
    }

    /// Roll a die: uniform integer in `1..=max`.
    pub fn dice(&mut self, max: i32) -> i32 {
        self.rng.dice(max)
    }

    /// Uniform integer in `min..=max` (both ends inclusive).
    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        self.rng.random_int(min, max)
    }

    /// Uniform float in `[min, max)`.
    pub fn random_float(&mut self, min: f64, max: f64) -> f64 {
        self.rng.random_float(min, max)
    }

    pub(crate) fn rng(&self) -> &RandomService {
        &self.rng
    }

    /// Reassemble an engine from captured state. Definitions are not
    /// part of a capture; the caller re-registers content afterwards.
    pub(crate) fn assemble(
        cards: CardRegistry,
        players: PlayerRegistry,
        piles: PileManager,
        props: PropMap,
        rng: RandomService,
    ) -> Self {
        Self {
            defines: DefineRegistry::new(),
            cards,
            players,
            piles,
            props,
            rng,
        }
    }

    /// Capture the replayable state of this engine.
    ///
    /// Two engines with equal snapshots produce identical futures under
    /// identical operation sequences.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }
}

/// Serializes as its snapshot; definitions are content data shipped
/// separately and must be re-registered on load.
impl Serialize for CardEngine {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CardEngine {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = EngineSnapshot::deserialize(deserializer)?;
        Ok(snapshot.restore())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    fn content() -> Vec<CardDefine> {
        vec![
            CardDefine::new(DefineId::new(1), "servant")
                .with_effect(Effect::active("battlecry"))
                .with_prop("attack", 2),
            CardDefine::new(DefineId::new(2), "spell").with_prop("damage", 3),
        ]
    }

    #[test]
    fn test_with_defines_rejects_conflicts() {
        let dup = vec![
            CardDefine::new(DefineId::new(1), "servant"),
            CardDefine::new(DefineId::new(1), "spell"),
        ];
        let err = CardEngine::with_defines(42, dup).unwrap_err();
        assert!(matches!(err, EngineError::ConflictingDefine { .. }));
    }

    #[test]
    fn test_create_card_requires_known_define() {
        let mut engine = CardEngine::with_defines(42, content()).unwrap();

        let card = engine.create_card(DefineId::new(1)).unwrap();
        assert_eq!(engine.get_card(card).unwrap().define, DefineId::new(1));
        assert_eq!(engine.define_of(card).unwrap().card_type, "servant");

        let err = engine.create_card(DefineId::new(9)).unwrap_err();
        assert_eq!(err, EngineError::UnknownDefine(DefineId::new(9)));
    }

    #[test]
    fn test_remove_card_clears_pile_and_frees_id() {
        let mut engine = CardEngine::with_defines(42, content()).unwrap();
        let deck = engine.add_pile("deck", None);

        let a = engine.create_card(DefineId::new(1)).unwrap();
        let b = engine.create_card(DefineId::new(1)).unwrap();
        engine.insert_card(a, deck, Position::Top).unwrap();
        engine.insert_card(b, deck, Position::Top).unwrap();

        assert!(engine.remove_card(a));
        assert!(!engine.remove_card(a));
        assert_eq!(engine.pile_of(a), None);
        assert_eq!(engine.pile(deck).cards(), &[b]);

        // The freed id comes back.
        assert_eq!(engine.create_card(DefineId::new(2)).unwrap(), a);
        assert!(engine.check_piles());
    }

    #[test]
    fn test_merge_define_id_mismatch() {
        let mut engine = CardEngine::with_defines(42, content()).unwrap();

        let err = engine
            .merge_define(DefineId::new(1), CardDefine::new(DefineId::new(2), "spell"))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::MergeIdMismatch {
                target: DefineId::new(1),
                newer: DefineId::new(2),
            }
        );

        // Matching ids update in place.
        engine
            .merge_define(
                DefineId::new(1),
                CardDefine::new(DefineId::new(1), "servant").with_prop("attack", 5),
            )
            .unwrap();
        assert_eq!(
            engine.get_define(DefineId::new(1)).unwrap().props.int("attack"),
            Some(5)
        );
    }

    #[test]
    fn test_players_join_in_order() {
        let mut engine = CardEngine::new(42);
        let alice = engine.add_player("alice");
        let bob = engine.add_player("bob");

        assert_eq!(alice, PlayerId::new(0));
        assert_eq!(bob, PlayerId::new(1));
        assert_eq!(engine.player_at(1).unwrap().name, "bob");
        assert_eq!(engine.player_index(alice), Some(0));
        assert_eq!(engine.players().len(), 2);
    }

    #[test]
    fn test_pile_owner_reassignment() {
        let mut engine = CardEngine::new(42);
        let alice = engine.add_player("alice");
        let deck = engine.add_pile("deck", None);

        assert_eq!(engine.pile(deck).owner(), None);
        engine.set_pile_owner(deck, Some(alice));
        assert_eq!(engine.pile(deck).owner(), Some(alice));
    }

    #[test]
    fn test_clone_is_an_independent_fork() {
        let mut engine = CardEngine::with_defines(42, content()).unwrap();
        let deck = engine.add_pile("deck", None);
        for _ in 0..10 {
            let card = engine.create_card(DefineId::new(1)).unwrap();
            engine.insert_card(card, deck, Position::Top).unwrap();
        }

        let mut fork = engine.clone();

        // Same stream state: identical draws on both sides.
        assert_eq!(engine.dice(20), fork.dice(20));

        // Mutating the fork leaves the original untouched.
        fork.shuffle_pile(deck);
        assert_eq!(engine.pile(deck).len(), 10);
    }

    #[test]
    fn test_engine_serde_round_trip() {
        let mut engine = CardEngine::with_defines(42, content()).unwrap();
        engine.add_player("alice");
        let deck = engine.add_pile("deck", None);
        let card = engine.create_card(DefineId::new(1)).unwrap();
        engine.insert_card(card, deck, Position::Top).unwrap();
        engine.props_mut().set("turn", 3);
        engine.dice(6);

        let json = serde_json::to_string(&engine).unwrap();
        let back: CardEngine = serde_json::from_str(&json).unwrap();

        assert_eq!(engine.snapshot(), back.snapshot());
    }
}
