//! Winding pulses and plan math
//!
//! Converts the turns-per-day target into discrete work: short/long motor
//! pulses, per-session pulse sequences, and the spacing of sessions over
//! the day. All arithmetic is integer and total planned turns always equal
//! the configured target exactly.

use heapless::Vec;

use crate::config::{ConfigError, WinderConfig};
use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds in one day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Maximum pulses per winding session
pub const MAX_SESSION_PULSES: usize = 64;

/// Units of rest between consecutive pulses
pub const GAP_UNITS: u32 = 1;

/// Direction mode for winding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectionMode {
    /// Continuous clockwise rotation
    Clockwise,
    /// Continuous counter-clockwise rotation
    CounterClockwise,
    /// Alternating direction, one turn each way
    #[default]
    Alternate,
}

/// Pulse length class
///
/// A dot lasts one pulse unit, a dash three. Dashes are full winding
/// turns; dots are short positioning nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PulseKind {
    /// Short pulse (1 unit)
    Dot,
    /// Long pulse (3 units)
    Dash,
}

impl PulseKind {
    /// Pulse length in units
    pub const fn units(self) -> u32 {
        match self {
            PulseKind::Dot => 1,
            PulseKind::Dash => 3,
        }
    }
}

/// A single motor pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pulse {
    /// Pulse length class
    pub kind: PulseKind,
    /// Rotation direction
    pub direction: Direction,
}

impl Pulse {
    /// Pulse duration for the given unit length
    pub const fn duration_ms(&self, unit_ms: u16) -> u32 {
        self.kind.units() * unit_ms as u32
    }
}

/// Inter-pulse gap duration for the given unit length
pub const fn gap_ms(unit_ms: u16) -> u32 {
    GAP_UNITS * unit_ms as u32
}

/// Generate the pulse sequence for one winding session
///
/// One dash per turn. In [`DirectionMode::Alternate`] directions alternate
/// per turn, starting clockwise.
///
/// # Returns
/// The pulse sequence, or None for zero turns or more turns than fit in
/// one session.
pub fn generate_session(
    turns: u16,
    mode: DirectionMode,
) -> Option<Vec<Pulse, MAX_SESSION_PULSES>> {
    if turns == 0 || turns as usize > MAX_SESSION_PULSES {
        return None;
    }

    let mut pulses = Vec::new();
    let mut direction = match mode {
        DirectionMode::Clockwise | DirectionMode::Alternate => Direction::Clockwise,
        DirectionMode::CounterClockwise => Direction::CounterClockwise,
    };

    for _ in 0..turns {
        pulses
            .push(Pulse {
                kind: PulseKind::Dash,
                direction,
            })
            .ok()?;
        if mode == DirectionMode::Alternate {
            direction = direction.opposite();
        }
    }

    Some(pulses)
}

/// Session layout for a turns-per-day target
///
/// The day is split into equal sessions of `turns_per_session` turns; the
/// last session absorbs the remainder so the total matches the target
/// exactly. Firing sessions at `interval_s` spacing is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindingPlan {
    /// Number of sessions per day
    pub sessions_per_day: u16,
    /// Turns in each full session
    pub turns_per_session: u16,
    /// Turns in the final session (1..=turns_per_session)
    pub last_session_turns: u16,
    /// Spacing between session starts (seconds)
    pub interval_s: u32,
}

impl WindingPlan {
    /// Derive the plan from a winder configuration
    pub fn for_config(config: &WinderConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let tpd = config.turns_per_day;
        let tps = config.turns_per_session;
        let sessions = tpd.div_ceil(tps);
        let last = tpd - (sessions - 1) * tps;

        Ok(Self {
            sessions_per_day: sessions,
            turns_per_session: tps,
            last_session_turns: last,
            interval_s: SECONDS_PER_DAY / sessions as u32,
        })
    }

    /// Turns in the session at `index` (0-based), 0 past the end
    pub fn session_turns(&self, index: u16) -> u16 {
        if index >= self.sessions_per_day {
            0
        } else if index == self.sessions_per_day - 1 {
            self.last_session_turns
        } else {
            self.turns_per_session
        }
    }

    /// Total turns across all sessions
    pub fn total_turns(&self) -> u32 {
        (self.sessions_per_day as u32 - 1) * self.turns_per_session as u32
            + self.last_session_turns as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_direction_session() {
        let pulses = generate_session(5, DirectionMode::Clockwise).unwrap();

        assert_eq!(pulses.len(), 5);
        for pulse in &pulses {
            assert_eq!(pulse.kind, PulseKind::Dash);
            assert_eq!(pulse.direction, Direction::Clockwise);
        }
    }

    #[test]
    fn test_alternate_session() {
        let pulses = generate_session(4, DirectionMode::Alternate).unwrap();

        assert_eq!(pulses.len(), 4);
        assert_eq!(pulses[0].direction, Direction::Clockwise);
        assert_eq!(pulses[1].direction, Direction::CounterClockwise);
        assert_eq!(pulses[2].direction, Direction::Clockwise);
        assert_eq!(pulses[3].direction, Direction::CounterClockwise);
    }

    #[test]
    fn test_session_zero_turns() {
        assert!(generate_session(0, DirectionMode::Alternate).is_none());
    }

    #[test]
    fn test_session_too_many_turns() {
        let result = generate_session(MAX_SESSION_PULSES as u16 + 1, DirectionMode::Clockwise);
        assert!(result.is_none());
    }

    #[test]
    fn test_pulse_durations() {
        let dot = Pulse {
            kind: PulseKind::Dot,
            direction: Direction::Clockwise,
        };
        let dash = Pulse {
            kind: PulseKind::Dash,
            direction: Direction::Clockwise,
        };

        assert_eq!(dot.duration_ms(200), 200);
        assert_eq!(dash.duration_ms(200), 600);
        assert_eq!(gap_ms(200), 200);
    }

    #[test]
    fn test_plan_even_split() {
        let config = WinderConfig {
            turns_per_day: 650,
            turns_per_session: 10,
            ..Default::default()
        };
        let plan = WindingPlan::for_config(&config).unwrap();

        assert_eq!(plan.sessions_per_day, 65);
        assert_eq!(plan.last_session_turns, 10);
        assert_eq!(plan.interval_s, SECONDS_PER_DAY / 65);
        assert_eq!(plan.total_turns(), 650);
    }

    #[test]
    fn test_plan_remainder_in_last_session() {
        let config = WinderConfig {
            turns_per_day: 655,
            turns_per_session: 10,
            ..Default::default()
        };
        let plan = WindingPlan::for_config(&config).unwrap();

        assert_eq!(plan.sessions_per_day, 66);
        assert_eq!(plan.last_session_turns, 5);
        assert_eq!(plan.total_turns(), 655);

        assert_eq!(plan.session_turns(0), 10);
        assert_eq!(plan.session_turns(64), 10);
        assert_eq!(plan.session_turns(65), 5);
        assert_eq!(plan.session_turns(66), 0);
    }

    #[test]
    fn test_plan_rejects_invalid_config() {
        let config = WinderConfig {
            turns_per_day: 50,
            ..Default::default()
        };
        assert!(WindingPlan::for_config(&config).is_err());
    }
}
