//! Presentation adapters fed from the event stream.
//!
//! The core emits domain events; this module maps them onto the narrow
//! audio/animation interfaces clients implement. Every call is
//! fire-and-forget and an absent sink degrades to silence, so simulation
//! correctness never depends on presentation being wired up.

use encounter_core::{AttackOutcome, EncounterEvent, RadialTier, SkillEffect, Turn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

/// Fire-and-forget audio surface.
pub trait AudioSink: Send {
    fn play_one_shot(&mut self, clip: &str);
    fn play_music(&mut self, clip: &str);
    fn stop_music(&mut self);
}

/// Fire-and-forget animation cue surface, one per combatant side.
pub trait AnimationSink: Send {
    fn play_idle(&mut self);
    fn play_attack(&mut self);
    fn play_guard(&mut self);
    fn play_skill(&mut self, name: Option<&str>);
    fn play_heal(&mut self, name: Option<&str>);
    fn play_dodge(&mut self, name: Option<&str>);
}

/// Audio sink that does nothing.
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_one_shot(&mut self, _clip: &str) {}
    fn play_music(&mut self, _clip: &str) {}
    fn stop_music(&mut self) {}
}

/// Animation sink that does nothing.
pub struct NullAnimation;

impl AnimationSink for NullAnimation {
    fn play_idle(&mut self) {}
    fn play_attack(&mut self) {}
    fn play_guard(&mut self) {}
    fn play_skill(&mut self, _name: Option<&str>) {}
    fn play_heal(&mut self, _name: Option<&str>) {}
    fn play_dodge(&mut self, _name: Option<&str>) {}
}

/// Subscribes to the event stream and drives the sinks.
pub struct PresentationRouter {
    audio: Box<dyn AudioSink>,
    player_anim: Box<dyn AnimationSink>,
    enemy_anim: Box<dyn AnimationSink>,
}

impl PresentationRouter {
    pub fn new(
        audio: Box<dyn AudioSink>,
        player_anim: Box<dyn AnimationSink>,
        enemy_anim: Box<dyn AnimationSink>,
    ) -> Self {
        Self {
            audio,
            player_anim,
            enemy_anim,
        }
    }

    /// Router with all sinks silent.
    pub fn silent() -> Self {
        Self::new(
            Box::new(NullAudio),
            Box::new(NullAnimation),
            Box::new(NullAnimation),
        )
    }

    /// Consume events until the stream closes. Lagged receivers skip ahead;
    /// missed cosmetic cues are acceptable.
    pub fn spawn(mut self, mut events: broadcast::Receiver<EncounterEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => self.route(&event),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        debug!(missed, "presentation router lagged behind event stream");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    fn route(&mut self, event: &EncounterEvent) {
        match event {
            EncounterEvent::Started { .. } => {
                self.audio.play_music("battle");
                self.player_anim.play_idle();
                self.enemy_anim.play_idle();
            }
            EncounterEvent::AttackResolved { outcome, .. } => {
                self.player_anim.play_attack();
                match outcome {
                    AttackOutcome::Dodged => self.enemy_anim.play_dodge(None),
                    AttackOutcome::Guarded => self.enemy_anim.play_guard(),
                    AttackOutcome::Hit => self.audio.play_one_shot("hit"),
                }
            }
            EncounterEvent::GuardRaised => self.player_anim.play_guard(),
            EncounterEvent::GuardAbsorbed { .. } => self.enemy_anim.play_attack(),
            EncounterEvent::DefenseStarted { .. } => self.enemy_anim.play_attack(),
            EncounterEvent::DefenseResolved { tier, .. } => match tier {
                RadialTier::Best => self.player_anim.play_dodge(None),
                RadialTier::Good => self.player_anim.play_guard(),
                RadialTier::Miss => self.audio.play_one_shot("hit"),
            },
            EncounterEvent::SkillCast { skill, effect, .. } => match effect {
                SkillEffect::Heal(_) => self.player_anim.play_heal(Some(skill)),
                SkillEffect::Damage(_) => self.player_anim.play_skill(Some(skill)),
            },
            EncounterEvent::TurnStarted { turn: Turn::Player } => {
                self.player_anim.play_idle();
            }
            EncounterEvent::Ended { .. } => self.audio.stop_music(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingAnim(Arc<Mutex<Vec<&'static str>>>);

    impl AnimationSink for RecordingAnim {
        fn play_idle(&mut self) {
            self.0.lock().unwrap().push("idle");
        }
        fn play_attack(&mut self) {
            self.0.lock().unwrap().push("attack");
        }
        fn play_guard(&mut self) {
            self.0.lock().unwrap().push("guard");
        }
        fn play_skill(&mut self, _: Option<&str>) {
            self.0.lock().unwrap().push("skill");
        }
        fn play_heal(&mut self, _: Option<&str>) {
            self.0.lock().unwrap().push("heal");
        }
        fn play_dodge(&mut self, _: Option<&str>) {
            self.0.lock().unwrap().push("dodge");
        }
    }

    #[test]
    fn routes_defense_tiers_to_player_cues() {
        let cues = Arc::new(Mutex::new(Vec::new()));
        let mut router = PresentationRouter::new(
            Box::new(NullAudio),
            Box::new(RecordingAnim(cues.clone())),
            Box::new(NullAnimation),
        );

        router.route(&EncounterEvent::DefenseResolved {
            tier: RadialTier::Best,
            damage: 0,
            player_hp: 100,
        });
        router.route(&EncounterEvent::DefenseResolved {
            tier: RadialTier::Good,
            damage: 5,
            player_hp: 95,
        });

        assert_eq!(*cues.lock().unwrap(), vec!["dodge", "guard"]);
    }
}
