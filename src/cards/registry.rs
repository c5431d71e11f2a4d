//! Definition and card registries.
//!
//! `DefineRegistry` stores the static content: lookups fail loudly with
//! an error because a missing definition means broken content data.
//! `CardRegistry` holds live instances: lookups return `Option` because
//! "does this card exist yet" is a routine game-flow question.

use rustc_hash::FxHashMap;

use crate::core::EngineError;

use super::card::{Card, CardId};
use super::define::{CardDefine, DefineId};

/// Registry of card definitions.
///
/// Duplicate ids are a conflict, never a silent overwrite; hot-reload
/// goes through [`DefineRegistry::merge`] instead of re-registration.
#[derive(Clone, Debug, Default)]
pub struct DefineRegistry {
    defines: FxHashMap<DefineId, CardDefine>,
}

impl DefineRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Fails with [`EngineError::ConflictingDefine`] if the id is taken,
    /// leaving the existing definition in place.
    pub fn add(&mut self, define: CardDefine) -> Result<(), EngineError> {
        if let Some(existing) = self.defines.get(&define.id) {
            return Err(EngineError::ConflictingDefine {
                existing: existing.id,
                incoming: define.id,
            });
        }
        self.defines.insert(define.id, define);
        Ok(())
    }

    /// Look up a definition by id.
    pub fn get(&self, id: DefineId) -> Result<&CardDefine, EngineError> {
        self.defines.get(&id).ok_or(EngineError::UnknownDefine(id))
    }

    /// First definition with the given type tag.
    pub fn get_by_type(&self, card_type: &str) -> Result<&CardDefine, EngineError> {
        self.defines
            .values()
            .find(|d| d.card_type == card_type)
            .ok_or_else(|| EngineError::UnknownDefineType(card_type.to_string()))
    }

    /// Resolve a batch of ids; fails on the first unknown id.
    pub fn get_many(&self, ids: &[DefineId]) -> Result<Vec<&CardDefine>, EngineError> {
        ids.iter().map(|&id| self.get(id)).collect()
    }

    /// Hot-reload: merge a newer version into the registered definition
    /// with the same id.
    pub fn merge(&mut self, newer: CardDefine) -> Result<(), EngineError> {
        let target = self
            .defines
            .get_mut(&newer.id)
            .ok_or(EngineError::UnknownDefine(newer.id))?;
        target.merge(newer);
        Ok(())
    }

    /// Check if a definition id is registered.
    #[must_use]
    pub fn contains(&self, id: DefineId) -> bool {
        self.defines.contains_key(&id)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefine> {
        self.defines.values()
    }
}

/// Registry of live card instances.
///
/// Ids are allocated as the smallest unused positive integer, so an id
/// freed by removal is reused by the next creation.
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
}

impl CardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a card bound to `define`, allocating the smallest unused
    /// positive id.
    ///
    /// The caller (the engine) is responsible for having validated that
    /// the definition exists.
    pub fn create(&mut self, define: DefineId) -> CardId {
        let mut raw = 1;
        while self.cards.contains_key(&CardId::new(raw)) {
            raw += 1;
        }
        let id = CardId::new(raw);
        self.cards.insert(id, Card::new(id, define));
        id
    }

    /// Look up a card; `None` when it does not exist (yet).
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Batch lookup; absent ids yield `None` at their position.
    #[must_use]
    pub fn get_many(&self, ids: &[CardId]) -> Vec<Option<&Card>> {
        ids.iter().map(|&id| self.get(id)).collect()
    }

    /// Drop a card from the registry, freeing its id for reuse.
    ///
    /// Zone membership is the pile manager's business; the engine keeps
    /// the two in step.
    pub(crate) fn remove(&mut self, id: CardId) -> Option<Card> {
        self.cards.remove(&id)
    }

    /// Rebuild a registry from a captured card list.
    pub(crate) fn restore(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Check if a card id exists.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Number of live cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut registry = DefineRegistry::new();
        registry
            .add(CardDefine::new(DefineId::new(1), "servant"))
            .unwrap();

        assert_eq!(registry.get(DefineId::new(1)).unwrap().card_type, "servant");
        assert_eq!(
            registry.get(DefineId::new(9)),
            Err(EngineError::UnknownDefine(DefineId::new(9)))
        );
    }

    #[test]
    fn test_conflicting_define_keeps_existing() {
        let mut registry = DefineRegistry::new();
        registry
            .add(CardDefine::new(DefineId::new(1), "servant"))
            .unwrap();

        let err = registry
            .add(CardDefine::new(DefineId::new(1), "spell"))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::ConflictingDefine {
                existing: DefineId::new(1),
                incoming: DefineId::new(1),
            }
        );

        // The original registration survives.
        assert_eq!(registry.get(DefineId::new(1)).unwrap().card_type, "servant");
    }

    #[test]
    fn test_get_by_type() {
        let mut registry = DefineRegistry::new();
        registry
            .add(CardDefine::new(DefineId::new(1), "servant"))
            .unwrap();
        registry
            .add(CardDefine::new(DefineId::new(2), "spell"))
            .unwrap();

        assert_eq!(registry.get_by_type("spell").unwrap().id, DefineId::new(2));
        assert_eq!(
            registry.get_by_type("weapon"),
            Err(EngineError::UnknownDefineType("weapon".to_string()))
        );
    }

    #[test]
    fn test_get_many_fails_on_unknown() {
        let mut registry = DefineRegistry::new();
        registry
            .add(CardDefine::new(DefineId::new(1), "servant"))
            .unwrap();

        let ok = registry.get_many(&[DefineId::new(1)]).unwrap();
        assert_eq!(ok.len(), 1);

        let err = registry
            .get_many(&[DefineId::new(1), DefineId::new(2)])
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownDefine(DefineId::new(2)));
    }

    #[test]
    fn test_merge_unknown_define() {
        let mut registry = DefineRegistry::new();
        let err = registry
            .merge(CardDefine::new(DefineId::new(1), "servant"))
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownDefine(DefineId::new(1)));
    }

    #[test]
    fn test_merge_updates_in_place() {
        let mut registry = DefineRegistry::new();
        registry
            .add(CardDefine::new(DefineId::new(1), "servant").with_prop("attack", 2))
            .unwrap();
        registry
            .merge(CardDefine::new(DefineId::new(1), "servant").with_prop("attack", 3))
            .unwrap();

        let define = registry.get(DefineId::new(1)).unwrap();
        assert_eq!(define.props.int("attack"), Some(3));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_card_ids_count_up_from_one() {
        let mut registry = CardRegistry::new();
        let define = DefineId::new(1);

        assert_eq!(registry.create(define), CardId::new(1));
        assert_eq!(registry.create(define), CardId::new(2));
        assert_eq!(registry.create(define), CardId::new(3));
    }

    #[test]
    fn test_smallest_unused_id_is_reused() {
        let mut registry = CardRegistry::new();
        let define = DefineId::new(1);

        registry.create(define);
        registry.create(define);
        registry.create(define);
        registry.remove(CardId::new(2));

        // The freed id 2 is the smallest unused positive integer.
        assert_eq!(registry.create(define), CardId::new(2));
        assert_eq!(registry.create(define), CardId::new(4));
    }

    #[test]
    fn test_get_many_with_absent() {
        let mut registry = CardRegistry::new();
        let id = registry.create(DefineId::new(1));

        let found = registry.get_many(&[id, CardId::new(99)]);
        assert!(found[0].is_some());
        assert!(found[1].is_none());
    }
}
