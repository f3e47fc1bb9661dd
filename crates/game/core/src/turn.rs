//! Turn alternation between the two sides of an encounter.

use strum::Display;

/// Whose turn it is. Strictly alternates; the encounter loop decides when
/// to stop based on HP, not on this value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    #[default]
    Player,
    Enemy,
}

impl Turn {
    /// The other side.
    pub fn next(self) -> Turn {
        match self {
            Turn::Player => Turn::Enemy,
            Turn::Enemy => Turn::Player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_player() {
        assert_eq!(Turn::default(), Turn::Player);
    }

    #[test]
    fn alternation_parity() {
        let mut turn = Turn::Player;
        for n in 1..=10u32 {
            turn = turn.next();
            let expected = if n % 2 == 0 { Turn::Player } else { Turn::Enemy };
            assert_eq!(turn, expected);
        }
    }
}
