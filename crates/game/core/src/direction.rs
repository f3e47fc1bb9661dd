//! Logical input directions tracked by the sequence QTE.

use strum::Display;

/// The four directions a client can report as "pressed this tick".
///
/// Clients map whatever physical keys they like (arrows, WASD, a d-pad)
/// onto these before handing the core an [`crate::InputFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Left,
    Down,
}

impl Direction {
    /// All four tracked directions, in a fixed canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Down,
    ];

    /// Dense index into per-direction arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }
}
