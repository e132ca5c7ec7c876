//! Game aggregate - a named match that players join

use chrono::{DateTime, Utc};

use crate::ids::GameId;
use crate::value_objects::GameName;

/// A game. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    name: GameName,
    created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(name: GameName, now: DateTime<Utc>) -> Self {
        Self {
            id: GameId::new(),
            name,
            created_at: now,
        }
    }

    /// Rebuild a game loaded from storage.
    pub fn restore(id: GameId, name: GameName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    #[inline]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &GameName {
        &self.name
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the game was created strictly after `since`.
    pub fn created_after(&self, since: DateTime<Utc>) -> bool {
        self.created_at > since
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn recency_is_strict() {
        let now = Utc::now();
        let game = Game::new(GameName::new("Arena").unwrap(), now);
        assert!(game.created_after(now - Duration::hours(24)));
        assert!(!game.created_after(now));
    }
}
