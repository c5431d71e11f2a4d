//! Effects - the behavior units attached to card definitions.
//!
//! An effect's *kind* is a tagged variant rather than a runtime type
//! test over a heterogeneous list: active effects are player-invoked,
//! triggered effects carry their own event-name set, and passive
//! effects are always-on modifiers that no lookup returns. The engine
//! never executes effect bodies; the `script` handle is how games
//! dispatch to their own logic.

use serde::{Deserialize, Serialize};

/// A behavior unit attached to a card definition.
///
/// Lookup over a definition's effect list is first-match in declaration
/// order (see `CardDefine`), so the order effects are authored in is a
/// contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Invoked directly by a player (a card's "use" action).
    Active {
        /// Opaque handle games use to dispatch the effect body.
        script: String,
    },

    /// Fires when one of the named events is raised.
    ///
    /// Event names are the canonical phase names a trigger manager
    /// resolves for each event type: a single triggered effect may
    /// listen to both "on" and "after" names, or several event types.
    Triggered {
        /// Opaque dispatch handle.
        script: String,
        /// Canonical event names this effect listens for.
        events: Vec<String>,
    },

    /// Always-on modifier; never returned by any lookup.
    Passive {
        /// Opaque dispatch handle.
        script: String,
    },
}

impl Effect {
    /// Create an active effect.
    pub fn active(script: impl Into<String>) -> Self {
        Effect::Active {
            script: script.into(),
        }
    }

    /// Create a triggered effect listening for the given event names.
    pub fn triggered(script: impl Into<String>, events: Vec<String>) -> Self {
        Effect::Triggered {
            script: script.into(),
            events,
        }
    }

    /// Create a passive effect.
    pub fn passive(script: impl Into<String>) -> Self {
        Effect::Passive {
            script: script.into(),
        }
    }

    /// The dispatch handle, whatever the kind.
    #[must_use]
    pub fn script(&self) -> &str {
        match self {
            Effect::Active { script }
            | Effect::Triggered { script, .. }
            | Effect::Passive { script } => script,
        }
    }

    /// Is this a player-invoked effect?
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Effect::Active { .. })
    }

    /// Is this an event-triggered effect?
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        matches!(self, Effect::Triggered { .. })
    }

    /// Does this effect listen for the given canonical event name?
    ///
    /// Always `false` for non-triggered effects.
    #[must_use]
    pub fn listens_for(&self, event: &str) -> bool {
        match self {
            Effect::Triggered { events, .. } => events.iter().any(|e| e == event),
            _ => false,
        }
    }
}
