//! Skill definitions.
//!
//! Skills are plain data: a label, an AP cost, whether a sequence QTE gates
//! the cast, and a tagged effect. The uniform execution protocol (QTE gate,
//! then AP spend, then effect) lives in [`crate::engine`], so every skill
//! resolves the same way and only the numbers differ.

/// What a successful cast does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Restore HP on the caster.
    Heal(u32),
    /// Deal flat damage to the target.
    Damage(u32),
}

/// One entry in a combatant's fixed skill list. Created once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub label: String,
    pub cost: u32,
    pub requires_qte: bool,
    pub effect: SkillEffect,
}

impl Skill {
    pub fn new(
        label: impl Into<String>,
        cost: u32,
        requires_qte: bool,
        effect: SkillEffect,
    ) -> Self {
        Self {
            label: label.into(),
            cost,
            requires_qte,
            effect,
        }
    }

    /// "Heal": +20 HP for 2 AP, QTE-gated.
    pub fn heal() -> Self {
        Self::new("Heal", 2, true, SkillEffect::Heal(20))
    }

    /// "Heavy Slash": 30 damage for 2 AP, QTE-gated.
    pub fn heavy_slash() -> Self {
        Self::new("Heavy Slash", 2, true, SkillEffect::Damage(30))
    }

    /// "Magic Bullet": 50 damage for 3 AP, QTE-gated. The expensive nuke.
    pub fn magic_bullet() -> Self {
        Self::new("Magic Bullet", 3, true, SkillEffect::Damage(50))
    }

    /// The player's default loadout.
    pub fn player_loadout() -> Vec<Skill> {
        vec![Self::heal(), Self::heavy_slash(), Self::magic_bullet()]
    }

    /// Display name with magnitude, e.g. `Heavy Slash (30)`.
    pub fn display_name(&self) -> String {
        match self.effect {
            SkillEffect::Heal(amount) => format!("{} (+{amount} HP)", self.label),
            SkillEffect::Damage(amount) => format!("{} ({amount})", self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_loadout_matches_design_numbers() {
        let skills = Skill::player_loadout();
        assert_eq!(skills.len(), 3);
        assert_eq!(skills[0].effect, SkillEffect::Heal(20));
        assert_eq!(skills[0].cost, 2);
        assert_eq!(skills[1].effect, SkillEffect::Damage(30));
        assert_eq!(skills[1].cost, 2);
        assert_eq!(skills[2].effect, SkillEffect::Damage(50));
        assert_eq!(skills[2].cost, 3);
        assert!(skills.iter().all(|s| s.requires_qte));
    }

    #[test]
    fn display_name_includes_magnitude() {
        assert_eq!(Skill::heal().display_name(), "Heal (+20 HP)");
        assert_eq!(Skill::magic_bullet().display_name(), "Magic Bullet (50)");
    }
}
