//! Ordered-sequence challenge: press four arrows in the shown order before
//! the budget runs out.

use crate::direction::Direction;
use crate::input::InputFrame;
use crate::rng::CombatRng;

/// Minimum total budget; shorter configs are clamped, not rejected.
const MIN_TOTAL_TIME: f32 = 0.5;

/// Pass/fail result of a sequence challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceOutcome {
    Pass,
    Fail,
}

/// One in-flight ordered-sequence session.
///
/// The target list is a uniform random permutation of all four directions.
/// Each tick, the expected direction advances the cursor; any *other*
/// tracked direction fails immediately; an exhausted budget fails.
#[derive(Clone, Debug)]
pub struct SequenceQte {
    targets: [Direction; 4],
    cursor: usize,
    remaining: f32,
}

impl SequenceQte {
    pub fn new(rng: &mut dyn CombatRng, total_time: f32) -> Self {
        let mut targets = Direction::ALL;
        rng.shuffle(&mut targets);
        Self {
            targets,
            cursor: 0,
            remaining: total_time.max(MIN_TOTAL_TIME),
        }
    }

    /// Advance the session by one tick.
    ///
    /// Returns `None` while pending and `Some(outcome)` exactly once.
    /// Input is judged before time is charged, so a press on the final
    /// tick of the budget still counts. The expected key is checked first:
    /// a frame carrying both the expected and a wrong press advances.
    pub fn tick(&mut self, dt: f32, input: &InputFrame) -> Option<SequenceOutcome> {
        let expected = self.targets[self.cursor];

        if input.pressed(expected) {
            self.cursor += 1;
            if self.cursor == self.targets.len() {
                return Some(SequenceOutcome::Pass);
            }
        } else if input.any_pressed_except(expected) {
            // Wrong arrow: fail now, do not wait out the budget.
            return Some(SequenceOutcome::Fail);
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            return Some(SequenceOutcome::Fail);
        }

        None
    }

    /// Ordered target list, left to right.
    pub fn targets(&self) -> [Direction; 4] {
        self.targets
    }

    /// How many targets have been consumed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Seconds left in the budget.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
