//! Background encounter task.
//!
//! [`EncounterRuntime`] owns at most one running encounter. Each encounter
//! is a spawned task that ticks the core engine at a fixed rate, applies
//! queued player commands, samples input once per tick, and publishes
//! drained events on the bus. Starting a new encounter aborts the old
//! task, so no suspended step or QTE session ever leaks across encounters.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use encounter_core::{
    Combatant, Direction, EncounterConfig, EncounterEngine, EngineView, InputFrame, PcgRng, Skill,
    Winner,
};

use crate::difficulty::DifficultyProvider;
use crate::error::{Result, RuntimeError};
use crate::event_bus::EventBus;

/// Externally invocable entry points, mirroring the player-facing buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Attack,
    Guard,
    OpenSkills,
    Back,
    CastSkill(usize),
}

/// Synchronous per-tick input sampling.
///
/// The driver calls this exactly once per simulation tick; the returned
/// frame answers "was this logical key pressed since the last tick".
pub trait InputSource: Send {
    fn sample(&mut self) -> InputFrame;
}

/// Input source that never presses anything.
pub struct NullInput;

impl InputSource for NullInput {
    fn sample(&mut self) -> InputFrame {
        InputFrame::EMPTY
    }
}

/// Accumulator shared between an input thread and the driver.
///
/// The producing side records presses as they arrive; the driver's
/// [`InputSource::sample`] takes the accumulated frame and leaves an empty
/// one, which is what gives presses per-tick semantics.
#[derive(Clone, Default)]
pub struct SharedInput(Arc<Mutex<InputFrame>>);

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, direction: Direction) {
        let mut frame = self.0.lock().expect("input lock poisoned");
        *frame = frame.press(direction);
    }

    pub fn trigger(&self) {
        let mut frame = self.0.lock().expect("input lock poisoned");
        *frame = frame.with_trigger();
    }
}

impl InputSource for SharedInput {
    fn sample(&mut self) -> InputFrame {
        std::mem::take(&mut *self.0.lock().expect("input lock poisoned"))
    }
}

/// Everything needed to begin one encounter.
pub struct EncounterSetup {
    pub player: Combatant,
    pub skills: Vec<Skill>,
    pub enemy: Combatant,
    pub config: EncounterConfig,
    /// Fixed seed for reproducible encounters; `None` draws one from the
    /// process RNG.
    pub seed: Option<u64>,
    pub tick: Duration,
}

impl EncounterSetup {
    /// Default hero and loadout against the given enemy, 60 Hz ticks.
    pub fn against(enemy: Combatant) -> Self {
        Self {
            player: Combatant::hero(),
            skills: Skill::player_loadout(),
            enemy,
            config: EncounterConfig::default(),
            seed: None,
            tick: Duration::from_micros(16_667),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Client-side handle to a running encounter.
pub struct EncounterHandle {
    commands: mpsc::Sender<PlayerCommand>,
    result: oneshot::Receiver<Winner>,
    view: watch::Receiver<EngineView>,
}

impl EncounterHandle {
    /// Queue a player command for the next tick.
    pub async fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| RuntimeError::EncounterNotRunning)
    }

    /// Non-blocking variant of [`send`](Self::send) for input threads.
    pub fn try_send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .try_send(command)
            .map_err(|_| RuntimeError::EncounterNotRunning)
    }

    /// Latest engine snapshot.
    pub fn view(&self) -> EngineView {
        self.view.borrow().clone()
    }

    /// Wait for the encounter to report a winner. Fails with
    /// [`RuntimeError::Cancelled`] if the encounter was replaced first.
    pub async fn wait(&mut self) -> Result<Winner> {
        (&mut self.result).await.map_err(|_| RuntimeError::Cancelled)
    }
}

/// Owns the single in-flight encounter task and the event bus.
pub struct EncounterRuntime {
    bus: EventBus,
    difficulty: Box<dyn DifficultyProvider>,
    current: Option<JoinHandle<()>>,
}

impl EncounterRuntime {
    pub fn new(difficulty: Box<dyn DifficultyProvider>) -> Self {
        Self {
            bus: EventBus::new(),
            difficulty,
            current: None,
        }
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<encounter_core::EncounterEvent> {
        self.bus.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Begin an encounter, cancelling any encounter already in flight.
    pub fn start_encounter(
        &mut self,
        setup: EncounterSetup,
        input: Box<dyn InputSource>,
    ) -> EncounterHandle {
        if let Some(previous) = self.current.take() {
            // The aborted task drops its engine and with it any active QTE
            // session; the old handle resolves to Cancelled.
            previous.abort();
            info!("previous encounter aborted");
        }

        let tier = self.difficulty.current();
        let seed = setup.seed.unwrap_or_else(rand::random);
        let engine = EncounterEngine::new(
            setup.player,
            setup.enemy,
            setup.skills,
            setup.config,
            tier,
            Box::new(PcgRng::new(seed)),
        );
        info!(seed, tier = tier.tier, "encounter starting");

        let (command_tx, command_rx) = mpsc::channel(32);
        let (result_tx, result_rx) = oneshot::channel();
        let (view_tx, view_rx) = watch::channel(engine.view());

        let driver = EncounterDriver {
            engine,
            input,
            command_rx,
            result_tx,
            view_tx,
            bus: self.bus.clone(),
            tick: setup.tick,
        };
        self.current = Some(tokio::spawn(driver.run()));

        EncounterHandle {
            commands: command_tx,
            result: result_rx,
            view: view_rx,
        }
    }
}

/// The per-encounter worker: owns the engine for the encounter's lifetime.
struct EncounterDriver {
    engine: EncounterEngine,
    input: Box<dyn InputSource>,
    command_rx: mpsc::Receiver<PlayerCommand>,
    result_tx: oneshot::Sender<Winner>,
    view_tx: watch::Sender<EngineView>,
    bus: EventBus,
    tick: Duration,
}

impl EncounterDriver {
    async fn run(mut self) {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let dt = self.tick.as_secs_f32();

        let winner = loop {
            interval.tick().await;

            while let Ok(command) = self.command_rx.try_recv() {
                self.apply(command);
            }

            let frame = self.input.sample();
            self.engine.tick(dt, &frame);

            for event in self.engine.drain_events() {
                self.bus.publish(event);
            }
            let _ = self.view_tx.send(self.engine.view());

            if let Some(winner) = self.engine.winner() {
                break winner;
            }
        };

        info!(?winner, "encounter resolved");
        let _ = self.result_tx.send(winner);
    }

    fn apply(&mut self, command: PlayerCommand) {
        debug!(?command, "applying player command");
        let outcome = match command {
            PlayerCommand::Attack => self.engine.attack(),
            PlayerCommand::Guard => self.engine.guard(),
            PlayerCommand::OpenSkills => self.engine.open_skills(),
            PlayerCommand::Back => self.engine.back(),
            PlayerCommand::CastSkill(index) => self.engine.cast_skill(index),
        };
        if let Err(error) = outcome {
            // Command arrived out of phase (button mashing, stale UI).
            // Drop it; the UI state is re-broadcast every tick.
            warn!(?command, %error, "command rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::FixedDifficulty;
    use encounter_core::{DifficultyTier, EncounterEvent, Turn};

    fn always_hit_setup() -> EncounterSetup {
        let mut setup = EncounterSetup::against(Combatant::enemy("Slime", 20, 10)).with_seed(7);
        // Zeroed thresholds force every attack roll to land for full damage.
        setup.config.dodge_chance = 0.0;
        setup.config.guard_chance = 0.0;
        setup
    }

    #[tokio::test(start_paused = true)]
    async fn forced_hits_drive_the_encounter_to_victory() {
        let mut runtime = EncounterRuntime::new(Box::new(FixedDifficulty(DifficultyTier::T1)));
        let mut events = runtime.subscribe();
        let mut handle = runtime.start_encounter(always_hit_setup(), Box::new(NullInput));

        // Attack on every player turn; never touch the defense sweep.
        let winner = loop {
            tokio::select! {
                event = events.recv() => {
                    if let Ok(EncounterEvent::TurnStarted { turn: Turn::Player }) = event {
                        handle.send(PlayerCommand::Attack).await.unwrap();
                    }
                }
                winner = handle.wait() => break winner.unwrap(),
            }
        };

        assert_eq!(winner, Winner::Player);
        let view = handle.view();
        assert_eq!(view.enemy_hp.current, 0);
        // Two 15-damage hits win; one untriggered sweep cost 10 HP.
        assert_eq!(view.player_hp.current, 90);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_a_new_encounter_cancels_the_old_one() {
        let mut runtime = EncounterRuntime::new(Box::new(FixedDifficulty(DifficultyTier::T1)));
        let mut first = runtime.start_encounter(always_hit_setup(), Box::new(NullInput));
        let _second = runtime.start_encounter(always_hit_setup(), Box::new(NullInput));

        assert!(matches!(first.wait().await, Err(RuntimeError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn shared_input_frames_are_consumed_per_tick() {
        let shared = SharedInput::new();
        shared.press(Direction::Up);
        shared.trigger();

        let mut source: Box<dyn InputSource> = Box::new(shared.clone());
        let frame = source.sample();
        assert!(frame.pressed(Direction::Up));
        assert!(frame.triggered());

        // Consumed: the next tick sees an empty frame.
        assert_eq!(source.sample(), InputFrame::EMPTY);
    }
}
