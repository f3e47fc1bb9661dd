//! Per-tick input samples.
//!
//! The core never touches an input device. Each tick the host samples its
//! own input layer ("was this logical direction pressed this tick?") and
//! hands the result to [`crate::EncounterEngine::tick`].

use crate::direction::Direction;

/// Snapshot of the logical inputs pressed during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pressed: [bool; 4],
    trigger: bool,
}

impl InputFrame {
    /// Frame with nothing pressed.
    pub const EMPTY: InputFrame = InputFrame {
        pressed: [false; 4],
        trigger: false,
    };

    /// Mark a direction as pressed this tick.
    pub fn press(mut self, direction: Direction) -> Self {
        self.pressed[direction.index()] = true;
        self
    }

    /// Mark the trigger key (radial QTE confirm) as pressed this tick.
    pub fn with_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    #[inline]
    pub fn pressed(&self, direction: Direction) -> bool {
        self.pressed[direction.index()]
    }

    /// True if any tracked direction other than `expected` was pressed
    /// this tick.
    pub fn any_pressed_except(&self, expected: Direction) -> bool {
        Direction::ALL
            .iter()
            .any(|&d| d != expected && self.pressed(d))
    }

    #[inline]
    pub fn triggered(&self) -> bool {
        self.trigger
    }
}
