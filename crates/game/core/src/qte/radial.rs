//! Radial timing challenge: a needle sweeps one full rotation; trigger it
//! inside the scoring window.

use crate::input::InputFrame;

/// Minimum sweep duration; shorter configs are clamped, not rejected.
const MIN_DURATION: f32 = 0.1;
/// Minimum zone width in degrees.
const MIN_ZONE_WIDTH: f32 = 0.1;

/// Three-tier outcome of a radial challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadialTier {
    /// Outside both windows, or the sweep finished without a trigger.
    Miss,
    /// Inside the outer window.
    Good,
    /// Inside the center window.
    Best,
}

/// Geometry and timing of a radial challenge.
///
/// Angles are degrees with right = 0, top = 90, left = 180, bottom = 270.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialConfig {
    /// Where the needle starts drawing from. Mostly cosmetic.
    pub start_angle: f32,
    pub clockwise: bool,
    /// Center of the scoring windows.
    pub center_angle: f32,
    /// Total width of the best window (20 means +/- 10 degrees).
    pub best_width: f32,
    /// Total width of the good window, outside the best one.
    pub good_width: f32,
    /// Seconds for one full sweep before auto-miss.
    pub duration: f32,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            start_angle: 90.0,
            clockwise: true,
            center_angle: 270.0,
            best_width: 20.0,
            good_width: 90.0,
            duration: 2.0,
        }
    }
}

impl RadialConfig {
    /// Config with all values clamped to safe minimums.
    pub fn clamped(mut self) -> Self {
        self.duration = self.duration.max(MIN_DURATION);
        self.best_width = self.best_width.max(MIN_ZONE_WIDTH);
        self.good_width = self.good_width.max(MIN_ZONE_WIDTH);
        self.center_angle = normalize_angle(self.center_angle);
        self
    }

    /// Sweep duration override, used when the difficulty tier re-arms the
    /// defense challenge.
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }
}

/// One in-flight radial session.
///
/// The needle angle is a pure linear function of elapsed time; a trigger
/// input samples it and judges distance to the configured center.
#[derive(Clone, Debug)]
pub struct RadialQte {
    config: RadialConfig,
    elapsed: f32,
}

impl RadialQte {
    pub fn new(config: RadialConfig) -> Self {
        Self {
            config: config.clamped(),
            elapsed: 0.0,
        }
    }

    /// Advance the sweep by one tick.
    ///
    /// Returns `None` while pending and `Some(tier)` exactly once: the
    /// judged tier on a trigger press, or `Miss` once the sweep completes
    /// untriggered. A trigger on the tick that exhausts the duration is
    /// still judged.
    pub fn tick(&mut self, dt: f32, input: &InputFrame) -> Option<RadialTier> {
        self.elapsed += dt;

        if input.triggered() {
            return Some(self.judge(self.current_angle()));
        }

        if self.elapsed >= self.config.duration {
            return Some(RadialTier::Miss);
        }

        None
    }

    /// Needle angle for the current elapsed time, normalized to [0, 360).
    pub fn current_angle(&self) -> f32 {
        let t = (self.elapsed / self.config.duration).clamp(0.0, 1.0);
        let sweep = if self.config.clockwise { -360.0 } else { 360.0 };
        normalize_angle(self.config.start_angle + sweep * t)
    }

    /// Fraction of the sweep completed, for progress display.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.config.duration).clamp(0.0, 1.0)
    }

    fn judge(&self, angle: f32) -> RadialTier {
        let err = delta_angle(angle, self.config.center_angle).abs();
        let half_best = self.config.best_width * 0.5;
        let half_good = self.config.good_width * 0.5;

        if err <= half_best {
            RadialTier::Best
        } else if err <= half_best + half_good {
            RadialTier::Good
        } else {
            RadialTier::Miss
        }
    }
}

/// Normalize an angle into [0, 360).
fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Shortest signed angular difference `b - a`, in [-180, 180).
fn delta_angle(a: f32, b: f32) -> f32 {
    (b - a + 540.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> RadialQte {
        RadialQte::new(RadialConfig::default())
    }

    #[test]
    fn needle_sweeps_linearly_from_start() {
        let mut qte = session();
        assert_eq!(qte.current_angle(), 90.0);

        // Quarter of a 2 s clockwise sweep: 90 - 90 = 0.
        qte.tick(0.5, &InputFrame::EMPTY);
        assert!((qte.current_angle() - 0.0).abs() < 1e-3);

        // Half sweep lands opposite the start.
        qte.tick(0.5, &InputFrame::EMPTY);
        assert!((qte.current_angle() - 270.0).abs() < 1e-3);
    }

    #[test]
    fn trigger_at_center_is_best() {
        let mut qte = session();
        // Half of the sweep puts the needle exactly on the 270 degree center.
        let result = qte.tick(1.0, &InputFrame::EMPTY.with_trigger());
        assert_eq!(result, Some(RadialTier::Best));
    }

    #[test]
    fn judge_tiers_by_angular_distance() {
        let qte = session();
        // half best = 10, half good = 45, boundary at 55 degrees.
        assert_eq!(qte.judge(270.0), RadialTier::Best);
        assert_eq!(qte.judge(280.0), RadialTier::Best); // inclusive best edge
        assert_eq!(qte.judge(281.0), RadialTier::Good);
        assert_eq!(qte.judge(270.0 + 55.0), RadialTier::Good); // inclusive outer edge
        assert_eq!(qte.judge(270.0 + 55.5), RadialTier::Miss);
        assert_eq!(qte.judge(90.0), RadialTier::Miss); // opposite side
        // Shortest-path distance wraps through zero.
        assert_eq!(qte.judge(215.0), RadialTier::Good);
    }

    #[test]
    fn untriggered_sweep_is_a_miss() {
        let mut qte = session();
        let mut outcome = None;
        let mut ticks = 0;
        while outcome.is_none() {
            outcome = qte.tick(1.0 / 60.0, &InputFrame::EMPTY);
            ticks += 1;
            assert!(ticks < 200, "sweep must auto-resolve");
        }
        assert_eq!(outcome, Some(RadialTier::Miss));
    }

    #[test]
    fn trigger_on_final_tick_is_still_judged() {
        // Center on the start angle so a full sweep ends inside the best
        // window; a timeout would report Miss instead.
        let mut qte = RadialQte::new(RadialConfig {
            center_angle: 90.0,
            ..RadialConfig::default()
        });
        qte.tick(1.9, &InputFrame::EMPTY);
        // This tick crosses the duration, but the press still samples.
        let result = qte.tick(0.2, &InputFrame::EMPTY.with_trigger());
        assert_eq!(result, Some(RadialTier::Best));
    }

    #[test]
    fn degenerate_config_is_clamped() {
        let qte = RadialQte::new(RadialConfig {
            duration: 0.0,
            best_width: 0.0,
            good_width: 0.0,
            ..RadialConfig::default()
        });
        assert!(qte.config.duration >= MIN_DURATION);
        assert!(qte.config.best_width >= MIN_ZONE_WIDTH);
        assert!(qte.config.good_width >= MIN_ZONE_WIDTH);
    }

    #[test]
    fn counter_clockwise_sweep_mirrors() {
        let mut qte = RadialQte::new(RadialConfig {
            clockwise: false,
            ..RadialConfig::default()
        });
        qte.tick(0.5, &InputFrame::EMPTY);
        assert!((qte.current_angle() - 180.0).abs() < 1e-3);
    }
}
