//! Immutable per-float mission parameters.

use crate::{MissionError, MissionResult};

/// Time reserved at the surface for data transmission, in seconds.
///
/// Subtracted from the cycle duration when sizing the drift phase.
pub const TRANSMISSION_RESERVE_SECS: f64 = 2.0 * 3_600.0;

/// The parameter set governing one float's operational cycle.
///
/// Fixed at deployment; the kernel only reads it.  Depths are positive
/// downward, in metres.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissionProfile {
    /// Target depth of the drift phase (m).
    pub parking_depth: f64,
    /// Deepest point of the cycle, reached before the ascent (m).
    pub profile_depth: f64,
    /// Vertical speed for every descent and ascent (m/s).
    pub vertical_speed: f64,
    /// Target duration of one full cycle (hours).
    pub cycle_duration: f64,
    /// Number of cycles the float completes before it is retired.
    pub life_expectancy: u32,
}

impl Default for MissionProfile {
    fn default() -> Self {
        Self {
            parking_depth:   1_000.0,
            profile_depth:   2_000.0,
            vertical_speed:  0.09,
            cycle_duration:  240.0,
            life_expectancy: 200,
        }
    }
}

impl MissionProfile {
    /// Cycle duration in seconds.
    #[inline]
    pub fn cycle_secs(&self) -> f64 {
        self.cycle_duration * 3_600.0
    }

    /// Seconds spent in vertical transit during one cycle: surface down to
    /// `drift_depth`, on down to `profile_depth`, and back up to the surface.
    pub fn transit_secs(&self, surface_depth: f64, drift_depth: f64, profile_depth: f64) -> f64 {
        let v = self.vertical_speed;
        (drift_depth - surface_depth) / v
            + (profile_depth - drift_depth) / v
            + (profile_depth - surface_depth) / v
    }

    /// Reject missions the kernel cannot fly in a domain spanning
    /// `surface_depth..bottom_depth`.
    ///
    /// Called once per float before the run starts; a failing float is never
    /// deployed.
    pub fn validate(&self, surface_depth: f64, bottom_depth: f64) -> MissionResult<()> {
        for (param, value) in [
            ("parking_depth", self.parking_depth),
            ("profile_depth", self.profile_depth),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(param, format!("depth must be a non-negative number, got {value}")));
            }
        }
        if !self.vertical_speed.is_finite() || self.vertical_speed <= 0.0 {
            return Err(invalid(
                "vertical_speed",
                format!("must be strictly positive, got {}", self.vertical_speed),
            ));
        }
        if !self.cycle_duration.is_finite() || self.cycle_duration <= 0.0 {
            return Err(invalid(
                "cycle_duration",
                format!("must be strictly positive, got {}", self.cycle_duration),
            ));
        }
        if self.life_expectancy == 0 {
            return Err(invalid("life_expectancy", "must be at least one cycle".to_owned()));
        }
        if self.parking_depth <= surface_depth {
            return Err(invalid(
                "parking_depth",
                format!("{} m is not below the surface at {surface_depth} m", self.parking_depth),
            ));
        }
        if self.parking_depth >= bottom_depth {
            return Err(invalid(
                "parking_depth",
                format!("{} m is not above the domain bottom at {bottom_depth} m", self.parking_depth),
            ));
        }

        let profile = self.profile_depth.min(bottom_depth);
        let spare = self.cycle_secs()
            - self.transit_secs(surface_depth, self.parking_depth, profile)
            - TRANSMISSION_RESERVE_SECS;
        if spare < 0.0 {
            return Err(invalid(
                "cycle_duration",
                format!(
                    "{} h leaves no drift time: transits and transmission need {:.0} s more",
                    self.cycle_duration, -spare
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(param: &'static str, reason: String) -> MissionError {
    MissionError::Invalid { param, reason }
}
