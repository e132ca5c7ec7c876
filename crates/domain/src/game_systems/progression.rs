//! Experience and leveling rules.
//!
//! A unit at level `L` needs `10 * (L + 1)` experience to reach `L + 1`.
//! Surplus experience carries over, so a single large award can cross
//! several levels at once. When the level changes, max health grows by
//! `10 * new_level` (once, sized by the final level) and current health is
//! rescaled so the unit keeps the same health fraction it had before.

/// Experience needed per level step, multiplied by `level + 1`.
pub const EXPERIENCE_STEP: i32 = 10;

/// Max-health bonus per level, multiplied by the level reached.
pub const MAX_HEALTH_STEP: i32 = 10;

/// Experience required to advance from `level` to `level + 1`.
pub fn max_experience(level: i32) -> i32 {
    EXPERIENCE_STEP * (level + 1)
}

/// The four fields the progression rules read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionState {
    pub level: i32,
    pub experience: i32,
    pub health: i32,
    pub max_health: i32,
}

impl ProgressionState {
    pub fn new(level: i32, experience: i32, health: i32, max_health: i32) -> Self {
        Self {
            level,
            experience,
            health,
            max_health,
        }
    }

    /// Convert banked experience into levels.
    ///
    /// Returns the state before and after. If no threshold is crossed the
    /// two are identical.
    ///
    /// # Example
    ///
    /// ```
    /// use warband_domain::game_systems::progression::ProgressionState;
    ///
    /// // 50/100 health, 25 experience at level 1 (threshold 20)
    /// let change = ProgressionState::new(1, 25, 50, 100).level_up();
    /// assert_eq!(change.after.level, 2);
    /// assert_eq!(change.after.experience, 5);
    /// assert_eq!(change.after.max_health, 120);
    /// assert_eq!(change.after.health, 60);
    /// ```
    pub fn level_up(self) -> LevelUp {
        let mut level = self.level;
        let mut experience = self.experience;

        while experience >= max_experience(level) {
            experience -= max_experience(level);
            level += 1;
        }

        if level == self.level {
            return LevelUp {
                before: self,
                after: self,
            };
        }

        let max_health = self.max_health + MAX_HEALTH_STEP * level;
        let health = if self.max_health > 0 {
            let fraction = f64::from(self.health) / f64::from(self.max_health);
            ((fraction * f64::from(max_health)).round() as i32).clamp(0, max_health)
        } else {
            self.health
        };

        LevelUp {
            before: self,
            after: ProgressionState {
                level,
                experience,
                health,
                max_health,
            },
        }
    }
}

/// Result of running the leveling rules once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub before: ProgressionState,
    pub after: ProgressionState,
}

impl LevelUp {
    pub fn leveled(&self) -> bool {
        self.after.level > self.before.level
    }

    pub fn levels_gained(&self) -> i32 {
        self.after.level - self.before.level
    }
}
