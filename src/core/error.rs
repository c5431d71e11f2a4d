//! Engine error taxonomy.
//!
//! Three families of failures surface from the core:
//! - conflicts (registering a definition whose id is taken)
//! - not-found for definitions (definitions are expected to exist by the
//!   time they are queried, so these fail loudly)
//! - invariant violations in zone mutation (inserting an owned card,
//!   mismatched replace arrays, a card missing from its expected pile)
//!
//! Card and pile lookups that may legitimately miss return `Option`
//! instead and never appear here. None of these errors are retried
//! internally; they indicate a bug in calling logic or content data.

use thiserror::Error;

use crate::cards::{CardId, DefineId};

/// Errors reported by the engine core.
///
/// Every variant carries the offending ids/names so the caller can build
/// a diagnostic without re-querying the engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A definition with this id is already registered.
    #[error("definition {incoming} conflicts with registered definition {existing}")]
    ConflictingDefine {
        /// Id of the definition already in the registry.
        existing: DefineId,
        /// Id of the definition that was being added.
        incoming: DefineId,
    },

    /// No definition with this id exists.
    #[error("unknown definition {0}")]
    UnknownDefine(DefineId),

    /// No definition with this type tag exists.
    #[error("no definition with card type {0:?}")]
    UnknownDefineType(String),

    /// A hot-reload merge was handed a definition with a different id.
    #[error("cannot merge definition {newer} into definition {target}")]
    MergeIdMismatch {
        /// Id of the definition being updated.
        target: DefineId,
        /// Id of the incoming definition.
        newer: DefineId,
    },

    /// The card already belongs to a pile; it must be removed first.
    #[error("{card} already belongs to pile {pile:?}")]
    AlreadyOwned {
        /// The card that was being inserted.
        card: CardId,
        /// Name of the pile that currently owns it.
        pile: String,
    },

    /// The card was expected in this pile but is not there.
    #[error("{card} is not in pile {pile:?}")]
    NotInPile {
        /// The missing card.
        card: CardId,
        /// Name of the pile that was searched.
        pile: String,
    },

    /// The card belongs to no pile at all.
    #[error("{0} does not belong to any pile")]
    NotInAnyPile(CardId),

    /// `replace` was called with arrays of different lengths.
    #[error("originals and replacements differ in length: {originals} vs {replacements}")]
    LengthMismatch {
        /// Number of original cards.
        originals: usize,
        /// Number of replacement cards.
        replacements: usize,
    },

    /// A random replacement named the receiving pile as its draw source.
    #[error("pile {0:?} cannot draw replacements from itself")]
    SameSourcePile(String),

    /// A random draw asked for more cards than the pile holds.
    #[error("pile {pile:?} holds {available} cards but {requested} were requested")]
    NotEnoughCards {
        /// Name of the pile that was drawn from.
        pile: String,
        /// Cards available in the pile.
        available: usize,
        /// Cards the draw required.
        requested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_context() {
        let err = EngineError::AlreadyOwned {
            card: CardId::new(3),
            pile: "deck".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Card(3)"));
        assert!(msg.contains("deck"));
    }

    #[test]
    fn test_conflict_names_both_defines() {
        let err = EngineError::ConflictingDefine {
            existing: DefineId::new(7),
            incoming: DefineId::new(7),
        };
        assert!(format!("{}", err).contains("Define(7)"));
    }
}
