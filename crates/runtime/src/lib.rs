//! Async host for [`encounter_core`].
//!
//! The runtime owns the background encounter task, wires up command/event
//! channels, and routes domain events to presentation adapters. The core
//! stays pure; everything that touches clocks, tasks, or devices lives
//! here.

pub mod difficulty;
pub mod driver;
pub mod error;
pub mod event_bus;
pub mod presentation;

pub use difficulty::{DifficultyProvider, FixedDifficulty};
pub use driver::{
    EncounterHandle, EncounterRuntime, EncounterSetup, InputSource, NullInput, PlayerCommand,
    SharedInput,
};
pub use error::{Result, RuntimeError};
pub use event_bus::EventBus;
pub use presentation::{AnimationSink, AudioSink, NullAnimation, NullAudio, PresentationRouter};
