//! Named-parameter float configuration.
//!
//! A [`FloatConfiguration`] is the user-facing form of a [`MissionProfile`]:
//! every parameter has a name, a unit, and a documented default, and can be
//! overridden one at a time by name before the fleet is deployed.
//!
//! # TOML format
//!
//! Every key is optional; missing keys keep their default.
//!
//! ```toml
//! name            = "gulf-stream"
//! parking_depth   = 1000   # m
//! profile_depth   = 2000   # m
//! vertical_speed  = 0.09   # m/s
//! cycle_duration  = 240    # h
//! life_expectancy = 200    # cycles
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{MissionError, MissionProfile, MissionResult};

// ── MissionParam ──────────────────────────────────────────────────────────────

/// The parameters a [`FloatConfiguration`] exposes by name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MissionParam {
    ParkingDepth,
    ProfileDepth,
    VerticalSpeed,
    CycleDuration,
    LifeExpectancy,
}

impl MissionParam {
    pub const ALL: [MissionParam; 5] = [
        MissionParam::ParkingDepth,
        MissionParam::ProfileDepth,
        MissionParam::VerticalSpeed,
        MissionParam::CycleDuration,
        MissionParam::LifeExpectancy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MissionParam::ParkingDepth   => "parking_depth",
            MissionParam::ProfileDepth   => "profile_depth",
            MissionParam::VerticalSpeed  => "vertical_speed",
            MissionParam::CycleDuration  => "cycle_duration",
            MissionParam::LifeExpectancy => "life_expectancy",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MissionParam::ParkingDepth   => "m",
            MissionParam::ProfileDepth   => "m",
            MissionParam::VerticalSpeed  => "m/s",
            MissionParam::CycleDuration  => "hours",
            MissionParam::LifeExpectancy => "cycle",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MissionParam::ParkingDepth   => "Drifting depth",
            MissionParam::ProfileDepth   => "Maximum profile depth",
            MissionParam::VerticalSpeed  => "Vertical profiling speed",
            MissionParam::CycleDuration  => "Maximum length of float complete cycle",
            MissionParam::LifeExpectancy => "Maximum number of completed cycle",
        }
    }
}

impl FromStr for MissionParam {
    type Err = MissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionParam::ALL
            .into_iter()
            .find(|p| p.name() == s.trim())
            .ok_or_else(|| MissionError::UnknownParameter(s.to_owned()))
    }
}

impl fmt::Display for MissionParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── FloatConfiguration ────────────────────────────────────────────────────────

/// A named float configuration with per-parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfiguration {
    pub name: String,
    pub parking_depth: f64,
    pub profile_depth: f64,
    pub vertical_speed: f64,
    pub cycle_duration: f64,
    pub life_expectancy: u32,
}

impl Default for FloatConfiguration {
    fn default() -> Self {
        Self::from_mission("default", &MissionProfile::default())
    }
}

impl FloatConfiguration {
    /// Configuration named `name` starting from the documented defaults.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn from_mission(name: impl Into<String>, mission: &MissionProfile) -> Self {
        Self {
            name:            name.into(),
            parking_depth:   mission.parking_depth,
            profile_depth:   mission.profile_depth,
            vertical_speed:  mission.vertical_speed,
            cycle_duration:  mission.cycle_duration,
            life_expectancy: mission.life_expectancy,
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> MissionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: &Path) -> MissionResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Current value of a parameter, widened to `f64`.
    pub fn get(&self, param: MissionParam) -> f64 {
        match param {
            MissionParam::ParkingDepth   => self.parking_depth,
            MissionParam::ProfileDepth   => self.profile_depth,
            MissionParam::VerticalSpeed  => self.vertical_speed,
            MissionParam::CycleDuration  => self.cycle_duration,
            MissionParam::LifeExpectancy => f64::from(self.life_expectancy),
        }
    }

    /// Override one parameter by name.
    ///
    /// Rejects unknown names and, for `life_expectancy`, values that are not
    /// a whole non-negative number of cycles.  Range checks against the
    /// domain happen later, in [`MissionProfile::validate`].
    pub fn update(&mut self, name: &str, value: f64) -> MissionResult<()> {
        let param: MissionParam = name.parse()?;
        if !value.is_finite() {
            return Err(MissionError::Invalid {
                param:  param.name(),
                reason: format!("{value} is not a finite number"),
            });
        }
        match param {
            MissionParam::ParkingDepth   => self.parking_depth = value,
            MissionParam::ProfileDepth   => self.profile_depth = value,
            MissionParam::VerticalSpeed  => self.vertical_speed = value,
            MissionParam::CycleDuration  => self.cycle_duration = value,
            MissionParam::LifeExpectancy => {
                if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
                    return Err(MissionError::Invalid {
                        param:  param.name(),
                        reason: format!("{value} is not a whole number of cycles"),
                    });
                }
                self.life_expectancy = value as u32;
            }
        }
        Ok(())
    }

    /// Freeze into the immutable per-float profile.
    pub fn to_mission(&self) -> MissionProfile {
        MissionProfile {
            parking_depth:   self.parking_depth,
            profile_depth:   self.profile_depth,
            vertical_speed:  self.vertical_speed,
            cycle_duration:  self.cycle_duration,
            life_expectancy: self.life_expectancy,
        }
    }
}

impl fmt::Display for FloatConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Float configuration '{}'", self.name)?;
        for param in MissionParam::ALL {
            writeln!(
                f,
                "  - {:<16} {:>10} {:<6} {}",
                param.name(),
                self.get(param),
                param.unit(),
                param.description(),
            )?;
        }
        Ok(())
    }
}
