//! Encounter tuning knobs and difficulty tiers.
//!
//! Configuration is defensively clamped to safe values rather than
//! rejected: a malformed tier still produces a playable encounter.

use crate::qte::radial::RadialConfig;

/// Tunable encounter parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterConfig {
    /// AP granted to the player at the start of each of their turns.
    pub ap_per_turn: u32,
    /// Attack roll below this: the target fully evades.
    pub dodge_chance: f64,
    /// Attack roll below this (and above `dodge_chance`): half damage.
    pub guard_chance: f64,
    /// Geometry of the defense challenge; duration comes from the tier.
    pub defense_qte: RadialConfig,
}

impl EncounterConfig {
    pub const DEFAULT_AP_PER_TURN: u32 = 1;
    pub const DEFAULT_DODGE_CHANCE: f64 = 0.10;
    pub const DEFAULT_GUARD_CHANCE: f64 = 0.35;

    pub fn new() -> Self {
        Self {
            ap_per_turn: Self::DEFAULT_AP_PER_TURN,
            dodge_chance: Self::DEFAULT_DODGE_CHANCE,
            guard_chance: Self::DEFAULT_GUARD_CHANCE,
            defense_qte: RadialConfig::default(),
        }
    }

    /// Clamp the roll thresholds into a coherent [0, 1] ordering.
    pub fn clamped(mut self) -> Self {
        self.dodge_chance = self.dodge_chance.clamp(0.0, 1.0);
        self.guard_chance = self.guard_chance.clamp(self.dodge_chance, 1.0);
        self
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Difficulty values read once at encounter start: an enemy stat multiplier
/// and the time budgets for both QTE engines.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyTier {
    pub tier: u8,
    /// Multiplies enemy MaxHP and ATK (ceiling-rounded).
    pub enemy_stat_mult: f64,
    /// Seconds for a full defense sweep before auto-miss.
    pub defense_duration: f32,
    /// Total budget for the ordered-sequence challenge.
    pub sequence_duration: f32,
}

impl DifficultyTier {
    pub const T1: Self = Self {
        tier: 1,
        enemy_stat_mult: 1.0,
        defense_duration: 2.0,
        sequence_duration: 4.0,
    };
    pub const T2: Self = Self {
        tier: 2,
        enemy_stat_mult: 1.25,
        defense_duration: 1.5,
        sequence_duration: 4.0,
    };
    pub const T3: Self = Self {
        tier: 3,
        enemy_stat_mult: 1.5,
        defense_duration: 1.25,
        sequence_duration: 4.0,
    };
    /// Boss tier.
    pub const T4: Self = Self {
        tier: 4,
        enemy_stat_mult: 2.0,
        defense_duration: 1.0,
        sequence_duration: 4.0,
    };

    pub const TABLE: [Self; 4] = [Self::T1, Self::T2, Self::T3, Self::T4];

    /// Tier by 1-based id, saturating at the boss tier.
    pub fn by_id(id: u8) -> Self {
        let idx = id.clamp(1, Self::TABLE.len() as u8) - 1;
        Self::TABLE[idx as usize]
    }

    /// Clamp all values to safe minimums.
    pub fn clamped(mut self) -> Self {
        self.enemy_stat_mult = self.enemy_stat_mult.max(0.1);
        self.defense_duration = self.defense_duration.max(0.1);
        self.sequence_duration = self.sequence_duration.max(0.5);
        self
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::T1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_clamp_into_order() {
        let config = EncounterConfig {
            dodge_chance: 0.5,
            guard_chance: 0.2,
            ..EncounterConfig::new()
        }
        .clamped();
        assert!(config.guard_chance >= config.dodge_chance);
    }

    #[test]
    fn tier_lookup_saturates() {
        assert_eq!(DifficultyTier::by_id(0).tier, 1);
        assert_eq!(DifficultyTier::by_id(3).tier, 3);
        assert_eq!(DifficultyTier::by_id(9).tier, 4);
    }

    #[test]
    fn degenerate_tier_is_clamped() {
        let tier = DifficultyTier {
            tier: 1,
            enemy_stat_mult: -2.0,
            defense_duration: 0.0,
            sequence_duration: 0.0,
        }
        .clamped();
        assert!(tier.enemy_stat_mult >= 0.1);
        assert!(tier.defense_duration >= 0.1);
        assert!(tier.sequence_duration >= 0.5);
    }
}
