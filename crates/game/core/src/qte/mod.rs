//! Timed reflex challenges (quick-time events).
//!
//! Both engines are cooperative, tick-driven sessions: construct one, feed
//! it `tick(dt, input)` every simulation step, and it returns `Some(result)`
//! exactly once when resolved. Nothing blocks; at most one session exists
//! at a time and it is owned by the encounter engine's current phase.

pub mod radial;
pub mod sequence;
