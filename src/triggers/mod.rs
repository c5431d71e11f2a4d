//! Trigger-manager boundary.
//!
//! The core does not implement event dispatch; an external trigger
//! manager owns it. What the core needs from that collaborator is small
//! and stable: given an event *type*, produce the canonical "on" and
//! "after" phase names that triggered effects register under. Effect
//! lookup on a definition is then a plain string-set membership test.
//!
//! [`TypeNameTriggers`] is the default mapping (names derived from the
//! event type's name); network layers that negotiate their own naming
//! scheme implement [`TriggerManager`] themselves.

/// Marker trait for event types.
///
/// Event types are ordinary unit structs games define; the trigger
/// manager maps each type to its phase names.
///
/// ```
/// use card_engine::triggers::EventTag;
///
/// struct TurnStart;
/// impl EventTag for TurnStart {}
/// ```
pub trait EventTag: 'static {}

/// Maps event types to canonical phase names.
///
/// The "on" and "after" phases are distinct: an effect registered for
/// `name_on::<E>()` does not fire for `name_after::<E>()`.
pub trait TriggerManager {
    /// Canonical name for the "on" phase of event `E`.
    fn name_on<E: EventTag>(&self) -> String;

    /// Canonical name for the "after" phase of event `E`.
    fn name_after<E: EventTag>(&self) -> String;
}

/// Trigger manager that derives phase names from the event type's name.
///
/// `TurnStart` resolves to `"onTurnStart"` / `"afterTurnStart"`. Stable
/// as long as the event type names themselves are stable, which is the
/// same contract the content data already relies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeNameTriggers;

impl TriggerManager for TypeNameTriggers {
    fn name_on<E: EventTag>(&self) -> String {
        format!("on{}", short_type_name::<E>())
    }

    fn name_after<E: EventTag>(&self) -> String {
        format!("after{}", short_type_name::<E>())
    }
}

/// Last path segment of a type name ("my_game::events::TurnStart" ->
/// "TurnStart").
fn short_type_name<E: 'static>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}
