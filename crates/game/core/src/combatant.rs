//! Combatant state and the mutation primitives the rules are allowed to use.

use std::fmt;

/// Integer resource meter (health, action points) tracked per combatant.
///
/// Invariant: `0 <= current <= maximum` after every operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Full meter (current == maximum).
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Restore up to `amount`, saturating at the maximum.
    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    /// Remove up to `amount`, saturating at zero.
    pub fn deplete(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// One side of an encounter: name, HP, AP, and a fixed attack stat.
///
/// Combatants are created fresh at encounter start and discarded when it
/// ends; progression between encounters lives outside the core.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub hp: ResourceMeter,
    pub ap: ResourceMeter,
    pub atk: u32,
}

impl Combatant {
    /// New combatant at full HP with `start_ap` action points.
    pub fn new(
        name: impl Into<String>,
        max_hp: u32,
        atk: u32,
        ap_max: u32,
        start_ap: u32,
    ) -> Self {
        Self {
            name: name.into(),
            hp: ResourceMeter::full(max_hp),
            ap: ResourceMeter::new(start_ap, ap_max),
            atk,
        }
    }

    /// Default player loadout: Hero, 100 HP, 15 ATK, 6 AP cap, 0 starting AP.
    pub fn hero() -> Self {
        Self::new("Hero", 100, 15, 6, 0)
    }

    /// Enemy combatant. Enemies have no AP economy.
    pub fn enemy(name: impl Into<String>, max_hp: u32, atk: u32) -> Self {
        Self::new(name, max_hp, atk, 0, 0)
    }

    /// Copy of this combatant with MaxHP and ATK ceil-scaled by a tier
    /// multiplier. HP is refilled to the new maximum. The multiplier is
    /// clamped to a safe minimum rather than rejected.
    pub fn scaled_for_tier(&self, mult: f64) -> Self {
        let mult = mult.max(0.1);
        let max_hp = ((self.hp.maximum as f64) * mult).ceil() as u32;
        let atk = ((self.atk as f64) * mult).ceil() as u32;
        Self {
            name: self.name.clone(),
            hp: ResourceMeter::full(max_hp),
            ap: self.ap,
            atk,
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp.restore(amount);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp.deplete(amount);
    }

    /// Spend `cost` AP. Returns false (and mutates nothing) when short.
    pub fn spend_ap(&mut self, cost: u32) -> bool {
        if self.ap.current < cost {
            return false;
        }
        self.ap.deplete(cost);
        true
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }
}

/// Ceiling division by two, used everywhere a 50% multiplier appears.
/// 15 ATK halved deals 8, not 7.
#[inline]
pub(crate) fn ceil_half(value: u32) -> u32 {
    value.div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_at_both_ends() {
        let mut hp = ResourceMeter::full(100);
        hp.restore(50);
        assert_eq!(hp.current, 100);
        hp.deplete(40);
        assert_eq!(hp.current, 60);
        hp.deplete(1000);
        assert_eq!(hp.current, 0);
        hp.restore(25);
        assert_eq!(hp.current, 25);
    }

    #[test]
    fn meter_stays_in_bounds_for_any_call_sequence() {
        let mut ap = ResourceMeter::new(0, 6);
        let ops: [(bool, u32); 9] = [
            (true, 3),
            (false, 1),
            (true, 10),
            (false, 6),
            (false, 1),
            (true, 2),
            (false, 0),
            (true, 1),
            (false, 99),
        ];
        for (restore, amount) in ops {
            if restore {
                ap.restore(amount);
            } else {
                ap.deplete(amount);
            }
            assert!(ap.current <= ap.maximum);
        }
    }

    #[test]
    fn spend_ap_refuses_without_mutating() {
        let mut hero = Combatant::new("Hero", 100, 15, 6, 2);
        assert!(!hero.spend_ap(3));
        assert_eq!(hero.ap.current, 2);
        assert!(hero.spend_ap(2));
        assert_eq!(hero.ap.current, 0);
    }

    #[test]
    fn tier_scaling_rounds_up() {
        let grunt = Combatant::enemy("Grunt", 20, 10);
        let scaled = grunt.scaled_for_tier(1.25);
        assert_eq!(scaled.hp.maximum, 25);
        assert_eq!(scaled.hp.current, 25);
        assert_eq!(scaled.atk, 13); // 12.5 rounds up

        // Degenerate multiplier is clamped, not rejected.
        let floor = grunt.scaled_for_tier(0.0);
        assert_eq!(floor.hp.maximum, 2);
        assert_eq!(floor.atk, 1);
    }

    #[test]
    fn ceil_half_rounds_up() {
        assert_eq!(ceil_half(15), 8);
        assert_eq!(ceil_half(10), 5);
        assert_eq!(ceil_half(1), 1);
        assert_eq!(ceil_half(0), 0);
    }
}
