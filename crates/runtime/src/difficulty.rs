//! Difficulty oracle read once at encounter start.

use encounter_core::DifficultyTier;

/// Supplies the difficulty values (QTE durations, enemy stat multiplier)
/// for the next encounter. The core never mutates these; progression
/// systems outside the runtime decide what the current tier is.
pub trait DifficultyProvider: Send + Sync {
    fn current(&self) -> DifficultyTier;
}

/// Always reports the same tier. Useful for tests and single-tier demos.
pub struct FixedDifficulty(pub DifficultyTier);

impl DifficultyProvider for FixedDifficulty {
    fn current(&self) -> DifficultyTier {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_provider_reports_its_tier() {
        let provider = FixedDifficulty(DifficultyTier::T3);
        assert_eq!(provider.current().tier, 3);
    }
}
