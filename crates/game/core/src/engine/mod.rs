//! The encounter loop.
//!
//! [`EncounterEngine`] is the authoritative reducer for one encounter. It
//! owns both combatants, the turn alternator, the one-shot guard stance,
//! and the single active QTE session. Hosts drive it with `tick(dt, input)`
//! plus the command entry points (attack, guard, skills), and drain
//! [`EncounterEvent`]s for presentation. Nothing mutates combat state from
//! outside this type.

use crate::combatant::{Combatant, ResourceMeter, ceil_half};
use crate::config::{DifficultyTier, EncounterConfig};
use crate::direction::Direction;
use crate::event::{AttackOutcome, EncounterEvent, SkillFailure};
use crate::input::InputFrame;
use crate::qte::radial::{RadialQte, RadialTier};
use crate::qte::sequence::{SequenceOutcome, SequenceQte};
use crate::rng::CombatRng;
use crate::skill::{Skill, SkillEffect};
use crate::turn::Turn;

/// Which side survived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    Player,
    Enemy,
}

/// Which player-facing panel is in front: the action menu or the skill list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UiMode {
    #[default]
    Actions,
    Skills,
}

/// Errors returned by the command entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("it is not the player's turn")]
    NotPlayersTurn,
    #[error("a challenge is already in progress")]
    ChallengeActive,
    #[error("the skill panel is not open")]
    SkillsNotOpen,
    #[error("no skill at index {index}")]
    UnknownSkill { index: usize },
    #[error("the encounter is already resolved")]
    EncounterResolved,
}

/// Internal phase of the encounter state machine.
///
/// `PlayerDeciding` covers both the action menu and the skill panel (the
/// [`UiMode`] flag distinguishes them); the two challenge phases each own
/// their session, which is how "at most one active QTE" is enforced.
enum Phase {
    PlayerDeciding,
    SkillChallenge { skill_index: usize, qte: SequenceQte },
    EnemyDefense { qte: RadialQte },
    Resolved { winner: Winner },
}

/// Discriminant of [`Phase`] exposed to hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseKind {
    PlayerDeciding,
    SkillChallenge,
    EnemyDefense,
    Resolved,
}

/// Read-only progress of an in-flight sequence challenge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequenceView {
    pub targets: [Direction; 4],
    pub cursor: usize,
    pub remaining: f32,
}

/// Read-only progress of an in-flight defense sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenseView {
    pub angle: f32,
    pub progress: f32,
}

/// Snapshot handed to presentation layers each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineView {
    pub player_name: String,
    pub player_hp: ResourceMeter,
    pub player_ap: ResourceMeter,
    pub enemy_name: String,
    pub enemy_hp: ResourceMeter,
    pub turn: Turn,
    pub ui_mode: UiMode,
    pub phase: PhaseKind,
    pub winner: Option<Winner>,
    pub sequence: Option<SequenceView>,
    pub defense: Option<DefenseView>,
}

/// Result of the phase-matching half of a tick, applied afterwards so the
/// borrow on the active session ends before state is mutated.
enum TickStep {
    Idle,
    EnemyActs,
    SkillResolved(SequenceOutcome),
    DefenseResolved(RadialTier),
}

/// One complete turn-based encounter from initialization to a winner.
pub struct EncounterEngine {
    player: Combatant,
    enemy: Combatant,
    skills: Vec<Skill>,
    config: EncounterConfig,
    tier: DifficultyTier,
    turn: Turn,
    ui_mode: UiMode,
    guard: bool,
    phase: Phase,
    events: Vec<EncounterEvent>,
    rng: Box<dyn CombatRng>,
}

impl EncounterEngine {
    /// Build an encounter. The enemy is pre-scaled by the tier multiplier;
    /// config and tier values are clamped to safe ranges.
    pub fn new(
        player: Combatant,
        enemy: Combatant,
        skills: Vec<Skill>,
        config: EncounterConfig,
        tier: DifficultyTier,
        rng: Box<dyn CombatRng>,
    ) -> Self {
        let tier = tier.clamped();
        let enemy = enemy.scaled_for_tier(tier.enemy_stat_mult);

        let mut engine = Self {
            player,
            enemy,
            skills,
            config: config.clamped(),
            tier,
            turn: Turn::Player,
            ui_mode: UiMode::Actions,
            guard: false,
            phase: Phase::PlayerDeciding,
            events: Vec::new(),
            rng,
        };

        engine.events.push(EncounterEvent::Started {
            enemy_name: engine.enemy.name.clone(),
            tier: engine.tier.tier,
        });
        engine
            .events
            .push(EncounterEvent::TurnStarted { turn: Turn::Player });
        engine.grant_turn_ap();
        engine
    }

    /// Encounter with the default hero, loadout, and config.
    pub fn with_defaults(enemy: Combatant, tier: DifficultyTier, rng: Box<dyn CombatRng>) -> Self {
        Self::new(
            Combatant::hero(),
            enemy,
            Skill::player_loadout(),
            EncounterConfig::default(),
            tier,
            rng,
        )
    }

    // ===== tick pipeline ====================================================

    /// Advance the encounter by one simulation step.
    ///
    /// Player turns are idle waits: decisions have no time limit, and the
    /// per-turn AP is granted when the turn begins, not here, so a command
    /// queued before the first tick of the turn still sees it. On the
    /// enemy's turn this either consumes the guard stance or arms and
    /// drives the defense sweep. An active skill challenge consumes the
    /// frame's input. After resolution every tick is a no-op.
    pub fn tick(&mut self, dt: f32, input: &InputFrame) {
        let step = match &mut self.phase {
            Phase::Resolved { .. } => TickStep::Idle,
            Phase::PlayerDeciding => match self.turn {
                Turn::Player => TickStep::Idle,
                Turn::Enemy => TickStep::EnemyActs,
            },
            Phase::SkillChallenge { qte, .. } => match qte.tick(dt, input) {
                Some(outcome) => TickStep::SkillResolved(outcome),
                None => TickStep::Idle,
            },
            Phase::EnemyDefense { qte } => match qte.tick(dt, input) {
                Some(tier) => TickStep::DefenseResolved(tier),
                None => TickStep::Idle,
            },
        };

        match step {
            TickStep::Idle => {}
            TickStep::EnemyActs => self.enemy_act(),
            TickStep::SkillResolved(outcome) => self.finish_skill_challenge(outcome),
            TickStep::DefenseResolved(tier) => self.finish_defense(tier),
        }
    }

    fn grant_turn_ap(&mut self) {
        self.player.ap.restore(self.config.ap_per_turn);
        self.events.push(EncounterEvent::ApGranted {
            current: self.player.ap.current,
            maximum: self.player.ap.maximum,
        });
    }

    fn enemy_act(&mut self) {
        if self.guard {
            // Guarded: half damage, stance spent, no defense challenge.
            self.guard = false;
            let damage = ceil_half(self.enemy.atk);
            self.player.take_damage(damage);
            self.events.push(EncounterEvent::GuardAbsorbed {
                damage,
                player_hp: self.player.hp.current,
            });
            if self.player.is_defeated() {
                self.resolve(Winner::Enemy);
            } else {
                self.advance_turn();
            }
            return;
        }

        let qte_config = self
            .config
            .defense_qte
            .with_duration(self.tier.defense_duration);
        self.events.push(EncounterEvent::DefenseStarted {
            duration: self.tier.defense_duration,
        });
        self.phase = Phase::EnemyDefense {
            qte: RadialQte::new(qte_config),
        };
    }

    fn finish_defense(&mut self, tier: RadialTier) {
        self.phase = Phase::PlayerDeciding;

        let damage = match tier {
            RadialTier::Best => 0,
            RadialTier::Good => ceil_half(self.enemy.atk),
            RadialTier::Miss => self.enemy.atk,
        };
        self.player.take_damage(damage);
        self.events.push(EncounterEvent::DefenseResolved {
            tier,
            damage,
            player_hp: self.player.hp.current,
        });

        if self.player.is_defeated() {
            self.resolve(Winner::Enemy);
        } else {
            self.advance_turn();
        }
    }

    fn finish_skill_challenge(&mut self, outcome: SequenceOutcome) {
        let Phase::SkillChallenge { skill_index, .. } =
            std::mem::replace(&mut self.phase, Phase::PlayerDeciding)
        else {
            unreachable!("finish_skill_challenge outside a skill challenge");
        };

        match outcome {
            SequenceOutcome::Pass => self.resolve_cast(skill_index),
            SequenceOutcome::Fail => {
                // No AP spent, no effect, turn consumed. The skill panel
                // stays up for the next player turn.
                self.events.push(EncounterEvent::SkillFailed {
                    skill: self.skills[skill_index].label.clone(),
                    reason: SkillFailure::QteFailed,
                });
                self.advance_turn();
            }
        }
    }

    /// AP spend and effect application, after any QTE gate has passed.
    fn resolve_cast(&mut self, skill_index: usize) {
        let skill = self.skills[skill_index].clone();

        if !self.player.spend_ap(skill.cost) {
            // The QTE gate runs strictly before the spend; a pass does not
            // refund anything here.
            self.events.push(EncounterEvent::SkillFailed {
                skill: skill.label,
                reason: SkillFailure::InsufficientAp,
            });
            self.advance_turn();
            return;
        }

        match skill.effect {
            SkillEffect::Heal(amount) => self.player.heal(amount),
            SkillEffect::Damage(amount) => self.enemy.take_damage(amount),
        }
        self.events.push(EncounterEvent::SkillCast {
            skill: skill.label,
            effect: skill.effect,
            ap_left: self.player.ap.current,
        });

        if self.enemy.is_defeated() {
            self.resolve(Winner::Player);
        } else {
            self.ui_mode = UiMode::Actions;
            self.advance_turn();
        }
    }

    fn advance_turn(&mut self) {
        self.turn = self.turn.next();
        self.events
            .push(EncounterEvent::TurnStarted { turn: self.turn });
        if self.turn == Turn::Player {
            self.grant_turn_ap();
        }
    }

    fn resolve(&mut self, winner: Winner) {
        self.phase = Phase::Resolved { winner };
        self.events.push(EncounterEvent::Ended { winner });
    }

    // ===== command entry points =============================================

    /// Basic attack: roll the enemy's reaction, apply damage, pass the turn.
    pub fn attack(&mut self) -> Result<(), CommandError> {
        self.ensure_player_deciding()?;
        self.ui_mode = UiMode::Actions;

        let roll = self.rng.roll_unit();
        let (outcome, damage) = if roll < self.config.dodge_chance {
            (AttackOutcome::Dodged, 0)
        } else if roll < self.config.guard_chance {
            (AttackOutcome::Guarded, ceil_half(self.player.atk))
        } else {
            (AttackOutcome::Hit, self.player.atk)
        };

        self.enemy.take_damage(damage);
        self.events.push(EncounterEvent::AttackResolved {
            outcome,
            damage,
            target_hp: self.enemy.hp.current,
        });

        if self.enemy.is_defeated() {
            self.resolve(Winner::Player);
        } else {
            self.advance_turn();
        }
        Ok(())
    }

    /// Brace for the next enemy attack and pass the turn. No QTE, no AP.
    pub fn guard(&mut self) -> Result<(), CommandError> {
        self.ensure_player_deciding()?;
        self.ui_mode = UiMode::Actions;
        self.guard = true;
        self.events.push(EncounterEvent::GuardRaised);
        self.advance_turn();
        Ok(())
    }

    /// Open the skill panel.
    pub fn open_skills(&mut self) -> Result<(), CommandError> {
        self.ensure_player_deciding()?;
        self.ui_mode = UiMode::Skills;
        self.events.push(EncounterEvent::SkillSelectionOpened);
        Ok(())
    }

    /// Back out of the skill panel to the action menu.
    pub fn back(&mut self) -> Result<(), CommandError> {
        self.ensure_player_deciding()?;
        self.ui_mode = UiMode::Actions;
        self.events.push(EncounterEvent::SkillSelectionClosed);
        Ok(())
    }

    /// Cast the skill at `index` from the open panel.
    ///
    /// QTE-gated skills arm a sequence challenge and resolve on a later
    /// tick; ungated skills resolve immediately. Either way a failed cast
    /// consumes the turn.
    pub fn cast_skill(&mut self, index: usize) -> Result<(), CommandError> {
        self.ensure_player_deciding()?;
        if self.ui_mode != UiMode::Skills {
            return Err(CommandError::SkillsNotOpen);
        }
        let skill = self
            .skills
            .get(index)
            .ok_or(CommandError::UnknownSkill { index })?;

        if skill.requires_qte {
            let qte = SequenceQte::new(self.rng.as_mut(), self.tier.sequence_duration);
            self.events.push(EncounterEvent::SequenceStarted {
                skill: skill.label.clone(),
                targets: qte.targets(),
                budget: self.tier.sequence_duration,
            });
            self.phase = Phase::SkillChallenge {
                skill_index: index,
                qte,
            };
        } else {
            self.resolve_cast(index);
        }
        Ok(())
    }

    fn ensure_player_deciding(&self) -> Result<(), CommandError> {
        match self.phase {
            Phase::Resolved { .. } => Err(CommandError::EncounterResolved),
            Phase::SkillChallenge { .. } | Phase::EnemyDefense { .. } => {
                Err(CommandError::ChallengeActive)
            }
            Phase::PlayerDeciding if self.turn != Turn::Player => {
                Err(CommandError::NotPlayersTurn)
            }
            Phase::PlayerDeciding => Ok(()),
        }
    }

    // ===== read-only surface ================================================

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    pub fn phase_kind(&self) -> PhaseKind {
        match self.phase {
            Phase::PlayerDeciding => PhaseKind::PlayerDeciding,
            Phase::SkillChallenge { .. } => PhaseKind::SkillChallenge,
            Phase::EnemyDefense { .. } => PhaseKind::EnemyDefense,
            Phase::Resolved { .. } => PhaseKind::Resolved,
        }
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::Resolved { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.winner().is_some()
    }

    /// Snapshot for presentation layers.
    pub fn view(&self) -> EngineView {
        let sequence = match &self.phase {
            Phase::SkillChallenge { qte, .. } => Some(SequenceView {
                targets: qte.targets(),
                cursor: qte.cursor(),
                remaining: qte.remaining(),
            }),
            _ => None,
        };
        let defense = match &self.phase {
            Phase::EnemyDefense { qte } => Some(DefenseView {
                angle: qte.current_angle(),
                progress: qte.progress(),
            }),
            _ => None,
        };

        EngineView {
            player_name: self.player.name.clone(),
            player_hp: self.player.hp,
            player_ap: self.player.ap,
            enemy_name: self.enemy.name.clone(),
            enemy_hp: self.enemy.hp,
            turn: self.turn,
            ui_mode: self.ui_mode,
            phase: self.phase_kind(),
            winner: self.winner(),
            sequence,
            defense,
        }
    }

    /// Drain the pending event queue, oldest first.
    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.events)
    }
}
