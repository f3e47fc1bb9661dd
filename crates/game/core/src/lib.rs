//! Deterministic turn-based encounter rules shared across clients.
//!
//! `encounter-core` defines the canonical combat rules (combatants, skills,
//! the two QTE engines, the turn alternator) and exposes a pure tick/command
//! API. All state mutation flows through [`engine::EncounterEngine`]; hosts
//! drive it with `tick(dt, input)` and drain [`event::EncounterEvent`]s for
//! presentation.
pub mod combatant;
pub mod config;
pub mod direction;
pub mod engine;
pub mod event;
pub mod input;
pub mod qte;
pub mod rng;
pub mod skill;
pub mod turn;

pub use combatant::{Combatant, ResourceMeter};
pub use config::{DifficultyTier, EncounterConfig};
pub use direction::Direction;
pub use engine::{CommandError, EncounterEngine, EngineView, PhaseKind, UiMode, Winner};
pub use event::{AttackOutcome, EncounterEvent, SkillFailure};
pub use input::InputFrame;
pub use qte::radial::{RadialConfig, RadialQte, RadialTier};
pub use qte::sequence::{SequenceOutcome, SequenceQte};
pub use rng::{CombatRng, PcgRng};
pub use skill::{Skill, SkillEffect};
pub use turn::Turn;
