//! Domain events emitted by the encounter engine.
//!
//! The engine never calls into audio, animation, or UI. It records what
//! happened; hosts drain the queue each tick and route events to whatever
//! presentation adapters they have. An absent adapter just means silence.

use crate::direction::Direction;
use crate::qte::radial::RadialTier;
use crate::skill::SkillEffect;
use crate::turn::Turn;

/// How the enemy's random roll answered a player attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Full damage landed.
    Hit,
    /// Target blocked: half damage, ceiling-rounded.
    Guarded,
    /// Target evaded: no damage.
    Dodged,
}

/// Why a skill cast reported failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillFailure {
    /// The gating sequence challenge was failed; no AP was spent.
    QteFailed,
    /// The caster could not pay the AP cost.
    InsufficientAp,
}

/// Everything observable that happens during an encounter, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterEvent {
    /// Encounter initialized and ready for the first player turn.
    Started { enemy_name: String, tier: u8 },
    /// A side's turn began.
    TurnStarted { turn: Turn },
    /// The player received their per-turn AP.
    ApGranted { current: u32, maximum: u32 },
    /// A player attack resolved against the enemy's roll.
    AttackResolved {
        outcome: AttackOutcome,
        damage: u32,
        target_hp: u32,
    },
    /// The player braced for the next enemy attack.
    GuardRaised,
    /// A guarded enemy attack landed for half damage; the stance is spent.
    GuardAbsorbed { damage: u32, player_hp: u32 },
    /// The skill selection panel opened.
    SkillSelectionOpened,
    /// Back out of skill selection to the action menu.
    SkillSelectionClosed,
    /// A sequence challenge was armed for a skill cast.
    SequenceStarted {
        skill: String,
        targets: [Direction; 4],
        budget: f32,
    },
    /// A skill cast completed: AP paid, effect applied.
    SkillCast {
        skill: String,
        effect: SkillEffect,
        ap_left: u32,
    },
    /// A skill cast failed. The turn is still consumed.
    SkillFailed { skill: String, reason: SkillFailure },
    /// The enemy attacks; the defense sweep was armed.
    DefenseStarted { duration: f32 },
    /// The defense challenge resolved and damage was applied.
    DefenseResolved {
        tier: RadialTier,
        damage: u32,
        player_hp: u32,
    },
    /// One side's HP reached zero.
    Ended { winner: crate::engine::Winner },
}
