//! Configuration type definitions
//!
//! These types represent the winder configuration. Configuration is stored
//! in flash as postcard-serialized binary data.

use crate::plan::{DirectionMode, MAX_SESSION_PULSES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum accepted turns-per-day target
pub const MIN_TURNS_PER_DAY: u16 = 100;

/// Maximum accepted turns-per-day target
pub const MAX_TURNS_PER_DAY: u16 = 3600;

/// Default turns-per-day target
///
/// 650 TPD covers the common minimum for automatic movements.
pub const DEFAULT_TURNS_PER_DAY: u16 = 650;

/// Minimum pulse unit length (ms)
pub const MIN_PULSE_UNIT_MS: u16 = 20;

/// Maximum pulse unit length (ms)
pub const MAX_PULSE_UNIT_MS: u16 = 2000;

/// Errors from configuration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// turns_per_day outside the accepted range
    TurnsPerDayOutOfRange,
    /// turns_per_session is zero, above the session capacity, or above
    /// turns_per_day
    SessionTurnsOutOfRange,
    /// pulse_unit_ms outside the accepted range
    PulseUnitOutOfRange,
}

/// Winder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinderConfig {
    /// Daily winding target (turns)
    pub turns_per_day: u16,
    /// Direction mode
    pub direction: DirectionMode,
    /// Turns per winding session
    pub turns_per_session: u16,
    /// Base pulse unit length (ms); dots last one unit, dashes three
    pub pulse_unit_ms: u16,
}

impl Default for WinderConfig {
    fn default() -> Self {
        Self {
            turns_per_day: DEFAULT_TURNS_PER_DAY,
            direction: DirectionMode::Alternate,
            turns_per_session: 10,
            pulse_unit_ms: 200,
        }
    }
}

impl WinderConfig {
    /// Create a config with the given daily target and default cadence
    pub fn new(turns_per_day: u16) -> Self {
        Self {
            turns_per_day,
            ..Default::default()
        }
    }

    /// Validate all fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TURNS_PER_DAY..=MAX_TURNS_PER_DAY).contains(&self.turns_per_day) {
            return Err(ConfigError::TurnsPerDayOutOfRange);
        }
        if self.turns_per_session == 0
            || self.turns_per_session > self.turns_per_day
            || self.turns_per_session as usize > MAX_SESSION_PULSES
        {
            return Err(ConfigError::SessionTurnsOutOfRange);
        }
        if !(MIN_PULSE_UNIT_MS..=MAX_PULSE_UNIT_MS).contains(&self.pulse_unit_ms) {
            return Err(ConfigError::PulseUnitOutOfRange);
        }
        Ok(())
    }

    /// Serialize into `buf` as postcard bytes
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], postcard::Error> {
        postcard::to_slice(self, buf).map(|slice| &*slice)
    }

    /// Deserialize from postcard bytes
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
