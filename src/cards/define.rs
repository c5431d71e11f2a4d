//! Card definitions - the static templates cards are created from.
//!
//! A `CardDefine` holds a card type's identity, type tag, ordered effect
//! list, and custom properties. It is constructed once at content-load
//! time; hot updates go through [`CardDefine::merge`] so that live card
//! instances keep pointing at the same definition object.
//!
//! Two definitions are equal iff their ids match, regardless of other
//! fields - the id is the definition's identity and hash key.

use serde::{Deserialize, Serialize};

use crate::core::props::{PropMap, PropValue};
use crate::effects::Effect;
use crate::triggers::{EventTag, TriggerManager};

/// Unique identifier for a card definition.
///
/// Identifies the "type" of card, not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefineId(pub i32);

impl DefineId {
    /// Create a new definition ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for DefineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Define({})", self.0)
    }
}

/// Static card definition.
///
/// `id` is stable for the definition's lifetime. `card_type` is an
/// opaque tag the engine does not interpret. `effects` is ordered;
/// lookup is first-match over declaration order, which games must
/// respect when authoring multiple effects per card. `props` is the
/// extension point for per-card-type custom data.
///
/// ## Example
///
/// ```
/// use card_engine::cards::{CardDefine, DefineId};
/// use card_engine::effects::Effect;
///
/// let bolt = CardDefine::new(DefineId::new(1), "spell")
///     .with_effect(Effect::active("deal_damage"))
///     .with_prop("damage", 3);
///
/// assert_eq!(bolt.props.int("damage"), Some(3));
/// assert!(bolt.active_effect().is_some());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefine {
    /// Unique identifier; the definition's identity.
    pub id: DefineId,

    /// Card type tag (game-specific, opaque to the engine).
    pub card_type: String,

    /// Ordered effect list; default empty.
    pub effects: Vec<Effect>,

    /// Game-specific custom properties.
    pub props: PropMap,
}

impl PartialEq for CardDefine {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CardDefine {}

impl std::hash::Hash for CardDefine {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl CardDefine {
    /// Create a new definition with no effects or props.
    #[must_use]
    pub fn new(id: DefineId, card_type: impl Into<String>) -> Self {
        Self {
            id,
            card_type: card_type.into(),
            effects: Vec::new(),
            props: PropMap::new(),
        }
    }

    /// Append an effect (builder pattern). Order matters for lookup.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a custom property (builder pattern).
    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(name, value);
        self
    }

    /// Get a custom property value.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Overwrite this definition's mutable fields from a newer version.
    ///
    /// Used for hot-reloading content without invalidating cards that
    /// reference this definition. The id is never changed by a merge;
    /// the engine's `merge_define` rejects a newer version whose id
    /// differs before it gets here.
    pub fn merge(&mut self, newer: CardDefine) {
        self.card_type = newer.card_type;
        self.effects = newer.effects;
        self.props = newer.props;
    }

    /// First active (player-invoked) effect in declaration order.
    #[must_use]
    pub fn active_effect(&self) -> Option<&Effect> {
        self.effects.iter().find(|e| e.is_active())
    }

    /// First triggered effect registered for the "on" phase of event `E`.
    ///
    /// The trigger manager resolves `E` to its canonical "on" name; the
    /// first effect whose event-name set contains that name wins.
    #[must_use]
    pub fn effect_on<E, M>(&self, manager: &M) -> Option<&Effect>
    where
        E: EventTag,
        M: TriggerManager + ?Sized,
    {
        let name = manager.name_on::<E>();
        self.effects.iter().find(|e| e.listens_for(&name))
    }

    /// First triggered effect registered for the "after" phase of event `E`.
    ///
    /// "After" is a distinct phase from "on"; the two resolve to
    /// different canonical names.
    #[must_use]
    pub fn effect_after<E, M>(&self, manager: &M) -> Option<&Effect>
    where
        E: EventTag,
        M: TriggerManager + ?Sized,
    {
        let name = manager.name_after::<E>();
        self.effects.iter().find(|e| e.listens_for(&name))
    }
}

/// Caller-supplied usability validation.
///
/// A pure query, not a throwing precondition: `None` means the card is
/// usable, `Some(reason)` carries a human-readable diagnostic. Callers
/// decide whether to block the action.
pub trait UsabilityRule {
    /// Check whether `player` may use `card` right now.
    fn usable(
        &self,
        engine: &crate::engine::CardEngine,
        define: &CardDefine,
        player: &crate::core::Player,
        card: &super::Card,
    ) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::TypeNameTriggers;

    struct Damaged;
    impl EventTag for Damaged {}

    struct Healed;
    impl EventTag for Healed {}

    #[test]
    fn test_equality_is_id_only() {
        let a = CardDefine::new(DefineId::new(1), "servant").with_prop("attack", 2);
        let b = CardDefine::new(DefineId::new(1), "spell");
        let c = CardDefine::new(DefineId::new(2), "servant");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let a = CardDefine::new(DefineId::new(1), "servant");
        let b = CardDefine::new(DefineId::new(1), "spell");

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn test_merge_keeps_id() {
        let mut old = CardDefine::new(DefineId::new(1), "servant")
            .with_effect(Effect::passive("taunt"))
            .with_prop("attack", 2);
        let newer = CardDefine::new(DefineId::new(1), "spell").with_prop("attack", 4);

        old.merge(newer);

        assert_eq!(old.id, DefineId::new(1));
        assert_eq!(old.card_type, "spell");
        assert!(old.effects.is_empty());
        assert_eq!(old.props.int("attack"), Some(4));
    }

    #[test]
    fn test_active_effect_first_match() {
        let define = CardDefine::new(DefineId::new(1), "servant")
            .with_effect(Effect::passive("aura"))
            .with_effect(Effect::active("battlecry"))
            .with_effect(Effect::active("second"));

        let effect = define.active_effect().unwrap();
        assert_eq!(effect.script(), "battlecry");
    }

    #[test]
    fn test_effect_on_and_after_are_distinct_phases() {
        let manager = TypeNameTriggers;
        let define = CardDefine::new(DefineId::new(1), "servant")
            .with_effect(Effect::triggered("hurt", vec!["onDamaged".into()]))
            .with_effect(Effect::triggered("avenge", vec!["afterDamaged".into()]));

        let on = define.effect_on::<Damaged, _>(&manager).unwrap();
        assert_eq!(on.script(), "hurt");

        let after = define.effect_after::<Damaged, _>(&manager).unwrap();
        assert_eq!(after.script(), "avenge");

        assert!(define.effect_on::<Healed, _>(&manager).is_none());
    }

    #[test]
    fn test_effect_on_first_match_over_declaration_order() {
        let manager = TypeNameTriggers;
        let define = CardDefine::new(DefineId::new(1), "servant")
            .with_effect(Effect::triggered("first", vec!["onDamaged".into()]))
            .with_effect(Effect::triggered("second", vec!["onDamaged".into()]));

        let effect = define.effect_on::<Damaged, _>(&manager).unwrap();
        assert_eq!(effect.script(), "first");
    }

    #[test]
    fn test_no_lookup_returns_passive() {
        let define =
            CardDefine::new(DefineId::new(1), "servant").with_effect(Effect::passive("aura"));

        assert!(define.active_effect().is_none());
        assert!(define
            .effect_on::<Damaged, _>(&TypeNameTriggers)
            .is_none());
    }
}
