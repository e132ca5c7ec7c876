//! Unit types and their fixed stat table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The kind of a unit. Each type has a fixed base max health and a fixed
/// attack strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Soldier,
    Archer,
    Wizard,
    Knight,
    Zombie,
}

impl UnitType {
    /// The roster granted to every player on join, in creation order.
    pub const ROSTER: [UnitType; 5] = [
        UnitType::Soldier,
        UnitType::Archer,
        UnitType::Wizard,
        UnitType::Knight,
        UnitType::Zombie,
    ];

    /// Max health of a freshly created level-1 unit.
    pub fn base_max_health(self) -> i32 {
        match self {
            Self::Soldier => 100,
            Self::Archer => 80,
            Self::Wizard => 60,
            Self::Knight => 120,
            Self::Zombie => 90,
        }
    }

    /// Flat damage added to every attack roll.
    pub fn strength(self) -> i32 {
        match self {
            Self::Zombie => 12,
            Self::Soldier => 20,
            Self::Archer => 10,
            Self::Wizard => 5,
            Self::Knight => 18,
        }
    }

    /// Position of this type in [`Self::ROSTER`].
    pub fn roster_position(self) -> usize {
        match self {
            Self::Soldier => 0,
            Self::Archer => 1,
            Self::Wizard => 2,
            Self::Knight => 3,
            Self::Zombie => 4,
        }
    }

    pub fn can_heal(self) -> bool {
        matches!(self, Self::Wizard)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soldier => "Soldier",
            Self::Archer => "Archer",
            Self::Wizard => "Wizard",
            Self::Knight => "Knight",
            Self::Zombie => "Zombie",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Soldier" => Ok(Self::Soldier),
            "Archer" => Ok(Self::Archer),
            "Wizard" => Ok(Self::Wizard),
            "Knight" => Ok(Self::Knight),
            "Zombie" => Ok(Self::Zombie),
            _ => Err(DomainError::parse(format!("Unknown unit type: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_every_type_once() {
        assert_eq!(UnitType::ROSTER.len(), 5);
        for ty in UnitType::ROSTER {
            assert_eq!(UnitType::ROSTER.iter().filter(|t| **t == ty).count(), 1);
        }
    }

    #[test]
    fn stat_table_matches_rules() {
        assert_eq!(UnitType::Knight.base_max_health(), 120);
        assert_eq!(UnitType::Wizard.base_max_health(), 60);
        assert_eq!(UnitType::Soldier.strength(), 20);
        assert_eq!(UnitType::Wizard.strength(), 5);
    }

    #[test]
    fn roster_position_matches_roster_order() {
        for (i, ty) in UnitType::ROSTER.iter().enumerate() {
            assert_eq!(ty.roster_position(), i);
        }
    }

    #[test]
    fn only_wizards_heal() {
        assert!(UnitType::Wizard.can_heal());
        assert!(!UnitType::Knight.can_heal());
    }

    #[test]
    fn parses_display_form() {
        for ty in UnitType::ROSTER {
            assert_eq!(ty.to_string().parse::<UnitType>().unwrap(), ty);
        }
        assert!("soldier".parse::<UnitType>().is_err());
    }

    #[test]
    fn serializes_as_type_name() {
        assert_eq!(serde_json::to_string(&UnitType::Archer).unwrap(), "\"Archer\"");
    }
}
