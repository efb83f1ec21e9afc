//! The watch winder controller
//!
//! [`WatchWinder`] owns a motor driver and a bounded pulse queue. Callers
//! enqueue work with [`WatchWinder::dot`], [`WatchWinder::dash`] or
//! [`WatchWinder::wind_session`]; execution is time-driven through
//! [`WatchWinder::update_with_delta`], called periodically (typically every
//! millisecond) by the owning firmware.
//!
//! ```ignore
//! let mut winder = WatchWinder::new(motor, 650)?;
//! winder.motor_mut().enable(true);
//! winder.wind_session(10)?;
//!
//! // In the periodic tick:
//! winder.update_with_delta(1);
//! ```

use heapless::Deque;

use crate::budget::TurnBudget;
use crate::config::{ConfigError, WinderConfig};
use crate::plan::{gap_ms, DirectionMode, Pulse, PulseKind, WindingPlan};
use crate::traits::{Direction, MotorDriver};

/// Maximum queued pulses
///
/// Large enough for a full session plus manual nudges.
pub const PULSE_QUEUE_DEPTH: usize = 96;

/// Pulse execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WinderState {
    /// No pulse in flight; motor stopped
    #[default]
    Idle,
    /// A pulse is in flight; motor running
    Pulsing,
    /// Inter-pulse rest; motor stopped
    Gap,
}

/// Errors returned by winder operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WinderError {
    /// Motor driver is disabled
    Disabled,
    /// Pulse queue is at capacity
    QueueFull,
    /// Daily turn budget exhausted
    BudgetExhausted,
}

/// Watch winder controller
///
/// Pulses are executed strictly in order: direction is applied while the
/// motor is stopped, the motor runs for the pulse duration, then rests for
/// one gap unit before the next pulse. Dashes are reserved against the
/// daily turn budget at enqueue time, so the winder can never execute more
/// than `turns_per_day` turns between roll-overs.
pub struct WatchWinder<M: MotorDriver> {
    motor: M,
    config: WinderConfig,
    plan: WindingPlan,
    queue: Deque<Pulse, PULSE_QUEUE_DEPTH>,
    budget: TurnBudget,
    state: WinderState,
    /// Elapsed time in the current phase (ms)
    phase_elapsed_ms: u32,
    /// Total duration of the current phase (ms)
    phase_total_ms: u32,
    /// Next direction handed out in Alternate mode
    next_alternate: Direction,
}

impl<M: MotorDriver> WatchWinder<M> {
    /// Create a winder with the given daily target and default cadence
    pub fn new(motor: M, turns_per_day: u16) -> Result<Self, ConfigError> {
        Self::with_config(motor, WinderConfig::new(turns_per_day))
    }

    /// Create a winder from a full configuration
    pub fn with_config(motor: M, config: WinderConfig) -> Result<Self, ConfigError> {
        let plan = WindingPlan::for_config(&config)?;
        let budget = TurnBudget::new(config.turns_per_day);

        Ok(Self {
            motor,
            config,
            plan,
            queue: Deque::new(),
            budget,
            state: WinderState::Idle,
            phase_elapsed_ms: 0,
            phase_total_ms: 0,
            next_alternate: Direction::Clockwise,
        })
    }

    /// Enqueue a short pulse (one unit)
    ///
    /// Dots are positioning nudges and are not counted against the daily
    /// budget.
    pub fn dot(&mut self) -> Result<(), WinderError> {
        if !self.motor.is_enabled() {
            return Err(WinderError::Disabled);
        }
        if self.queue.is_full() {
            return Err(WinderError::QueueFull);
        }

        let direction = self.next_direction();
        let _ = self.queue.push_back(Pulse {
            kind: PulseKind::Dot,
            direction,
        });
        Ok(())
    }

    /// Enqueue a long pulse (three units), one full winding turn
    pub fn dash(&mut self) -> Result<(), WinderError> {
        if !self.motor.is_enabled() {
            return Err(WinderError::Disabled);
        }
        if self.queue.is_full() {
            return Err(WinderError::QueueFull);
        }
        self.budget
            .try_reserve(1)
            .map_err(|_| WinderError::BudgetExhausted)?;

        let direction = self.next_direction();
        let _ = self.queue.push_back(Pulse {
            kind: PulseKind::Dash,
            direction,
        });
        Ok(())
    }

    /// Enqueue one winding session of `turns` dashes
    ///
    /// Fails atomically: on any error nothing is queued and nothing is
    /// reserved. `turns == 0` is a no-op.
    pub fn wind_session(&mut self, turns: u16) -> Result<(), WinderError> {
        if !self.motor.is_enabled() {
            return Err(WinderError::Disabled);
        }
        if turns == 0 {
            return Ok(());
        }

        let free = PULSE_QUEUE_DEPTH - self.queue.len();
        if turns as usize > free {
            return Err(WinderError::QueueFull);
        }
        self.budget
            .try_reserve(turns)
            .map_err(|_| WinderError::BudgetExhausted)?;

        for _ in 0..turns {
            let direction = self.next_direction();
            let _ = self.queue.push_back(Pulse {
                kind: PulseKind::Dash,
                direction,
            });
        }
        Ok(())
    }

    /// Advance execution by `delta_ms`
    ///
    /// Large deltas are consumed incrementally, so one long update behaves
    /// exactly like many short ones. If the driver is disabled the winder
    /// coasts and holds the queue; the interrupted pulse restarts from
    /// scratch after re-enable. A pulse whose `start` the driver refuses
    /// stays queued and is retried on a later update.
    pub fn update_with_delta(&mut self, delta_ms: u32) -> WinderState {
        if delta_ms == 0 {
            return self.state;
        }

        if !self.motor.is_enabled() {
            if self.state != WinderState::Idle {
                self.motor.stop();
                self.state = WinderState::Idle;
                self.phase_elapsed_ms = 0;
            }
            return self.state;
        }

        let mut remaining = delta_ms;
        loop {
            match self.state {
                WinderState::Idle => {
                    let Some(pulse) = self.queue.front().copied() else {
                        return WinderState::Idle;
                    };

                    self.motor.set_direction(pulse.direction);
                    if self.motor.start().is_err() {
                        return WinderState::Idle;
                    }
                    self.phase_elapsed_ms = 0;
                    self.phase_total_ms = pulse.duration_ms(self.config.pulse_unit_ms);
                    self.state = WinderState::Pulsing;
                }
                WinderState::Pulsing => {
                    let step = remaining.min(self.phase_total_ms - self.phase_elapsed_ms);
                    self.phase_elapsed_ms += step;
                    remaining -= step;

                    if self.phase_elapsed_ms >= self.phase_total_ms {
                        self.motor.stop();
                        // The pulse stays at the queue front while in
                        // flight; pop it only once it completed.
                        let _ = self.queue.pop_front();
                        self.phase_elapsed_ms = 0;
                        self.phase_total_ms = gap_ms(self.config.pulse_unit_ms);
                        self.state = WinderState::Gap;
                    }
                    if remaining == 0 {
                        return self.state;
                    }
                }
                WinderState::Gap => {
                    let step = remaining.min(self.phase_total_ms - self.phase_elapsed_ms);
                    self.phase_elapsed_ms += step;
                    remaining -= step;

                    if self.phase_elapsed_ms >= self.phase_total_ms {
                        self.phase_elapsed_ms = 0;
                        self.state = WinderState::Idle;
                    }
                    if remaining == 0 {
                        return self.state;
                    }
                }
            }
        }
    }

    /// Start a new day: reset the turn budget
    pub fn roll_over_day(&mut self) {
        self.budget.roll_over();
    }

    /// The configured daily target
    pub fn turns_per_day(&self) -> u16 {
        self.config.turns_per_day
    }

    /// Turns reserved so far today
    pub fn turns_today(&self) -> u16 {
        self.budget.turns_done()
    }

    /// Turns still available today
    pub fn remaining_today(&self) -> u16 {
        self.budget.remaining()
    }

    /// Current execution state
    pub fn state(&self) -> WinderState {
        self.state
    }

    /// Number of queued pulses (including the one in flight)
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued or in flight
    pub fn is_idle(&self) -> bool {
        self.state == WinderState::Idle && self.queue.is_empty()
    }

    /// The active configuration
    pub fn config(&self) -> &WinderConfig {
        &self.config
    }

    /// The session layout derived from the configuration
    pub fn plan(&self) -> WindingPlan {
        self.plan
    }

    /// Borrow the motor driver
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Borrow the motor driver mutably (e.g. to enable it)
    pub fn motor_mut(&mut self) -> &mut M {
        &mut self.motor
    }

    fn next_direction(&mut self) -> Direction {
        match self.config.direction {
            DirectionMode::Clockwise => Direction::Clockwise,
            DirectionMode::CounterClockwise => Direction::CounterClockwise,
            DirectionMode::Alternate => {
                let dir = self.next_alternate;
                self.next_alternate = dir.opposite();
                dir
            }
        }
    }
}
