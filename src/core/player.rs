//! Player identification and the join-order registry.
//!
//! Players are appended in join order and that order is stable: index
//! lookups keep returning the same player for the lifetime of the engine.

use serde::{Deserialize, Serialize};

/// Player identifier.
///
/// Distinct from the join index: ids are allocated once and stay with
/// the player; the index is their position in join order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
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

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Engine-scoped identity.
    pub id: PlayerId,
    /// Display name (for diagnostics and the room layer).
    pub name: String,
}

impl Player {
    /// Create a new player.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ordered player registry; order equals join order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player. Join order is never reshuffled.
    pub fn add(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Player at a join-order index; `None` when out of range.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Join-order index of a player; `None` when absent.
    #[must_use]
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Player by id; `None` when absent.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// All players in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Pick an id for the next player to join.
    ///
    /// Starts from the current player count and bumps by one if that id
    /// is taken. A collision-avoidance heuristic, not a general
    /// uniqueness search; callers that remove and re-add players with
    /// hand-picked ids are on their own.
    #[must_use]
    pub fn new_id(&self) -> PlayerId {
        let mut id = self.players.len() as u32;
        if self.players.iter().any(|p| p.id.raw() == id) {
            id += 1;
        }
        PlayerId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_order_is_stable() {
        let mut registry = PlayerRegistry::new();
        registry.add(Player::new(PlayerId::new(0), "alice"));
        registry.add(Player::new(PlayerId::new(1), "bob"));

        assert_eq!(registry.get_at(0).unwrap().name, "alice");
        assert_eq!(registry.get_at(1).unwrap().name, "bob");
        assert_eq!(registry.get_at(2), None);
    }

    #[test]
    fn test_index_of() {
        let mut registry = PlayerRegistry::new();
        registry.add(Player::new(PlayerId::new(5), "alice"));
        registry.add(Player::new(PlayerId::new(2), "bob"));

        assert_eq!(registry.index_of(PlayerId::new(2)), Some(1));
        assert_eq!(registry.index_of(PlayerId::new(99)), None);
    }

    #[test]
    fn test_new_id_is_count() {
        let mut registry = PlayerRegistry::new();
        assert_eq!(registry.new_id(), PlayerId::new(0));

        registry.add(Player::new(PlayerId::new(0), "alice"));
        assert_eq!(registry.new_id(), PlayerId::new(1));
    }

    #[test]
    fn test_new_id_bumps_once_on_collision() {
        let mut registry = PlayerRegistry::new();
        registry.add(Player::new(PlayerId::new(1), "alice"));

        // Count is 1 and id 1 is taken, so the heuristic yields 2.
        assert_eq!(registry.new_id(), PlayerId::new(2));
    }

    #[test]
    fn test_get_by_id() {
        let mut registry = PlayerRegistry::new();
        registry.add(Player::new(PlayerId::new(3), "carol"));

        assert_eq!(registry.get(PlayerId::new(3)).unwrap().name, "carol");
        assert!(registry.get(PlayerId::new(4)).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut registry = PlayerRegistry::new();
        registry.add(Player::new(PlayerId::new(0), "alice"));

        let json = serde_json::to_string(&registry).unwrap();
        let back: PlayerRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(registry, back);
    }
}
