//! TB6612FNG H-bridge driver (logic level)
//!
//! Models one channel of the TB6612FNG and implements the winder motor
//! trait. The struct holds no pins; it tracks what the bridge inputs
//! should be and exposes them through the `*_high()` accessors, which
//! [`super::outputs::HBridgeOutputs`] applies to hardware.
//!
//! Input mapping per the datasheet:
//!
//! | IN1 | IN2 | PWM  | mode         |
//! |-----|-----|------|--------------|
//! | H   | L   | duty | CW drive     |
//! | L   | H   | duty | CCW drive    |
//! | H   | H   | -    | short brake  |
//! | L   | L   | H    | stop (coast) |
//!
//! STBY is active-low; pulling it low powers the bridge down entirely.

use remontoire_core::traits::{Direction, MotorDriver, MotorError};

/// TB6612 driver configuration
#[derive(Debug, Clone)]
pub struct Tb6612Config {
    /// Drive duty cycle percentage (0-100) applied while running
    pub default_speed: u8,
}

impl Default for Tb6612Config {
    fn default() -> Self {
        Self { default_speed: 60 }
    }
}

/// Bridge output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tb6612State {
    /// Bridge powered down (STBY low)
    #[default]
    Standby,
    /// Outputs released, motor free to rotate
    Coast,
    /// Driving in the set direction
    Drive,
    /// Both low-side FETs on, motor shorted
    Brake,
}

/// Logic model of one TB6612FNG channel
pub struct Tb6612Motor {
    direction: Direction,
    speed: u8,
    enabled: bool,
    state: Tb6612State,
}

impl Tb6612Motor {
    /// Create a new driver, starting in standby
    pub fn new(config: Tb6612Config) -> Self {
        Self {
            direction: Direction::Clockwise,
            speed: config.default_speed.min(100),
            enabled: false,
            state: Tb6612State::Standby,
        }
    }

    /// Get the current bridge state
    pub fn state(&self) -> Tb6612State {
        self.state
    }

    /// Set the drive duty cycle percentage (clamped to 100)
    ///
    /// Applied immediately; there is no ramping.
    pub fn set_speed(&mut self, percent: u8) {
        self.speed = percent.min(100);
    }

    /// Get the drive duty cycle percentage
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// IN1 level
    pub fn in1_high(&self) -> bool {
        match self.state {
            Tb6612State::Drive => self.direction == Direction::Clockwise,
            Tb6612State::Brake => true,
            _ => false,
        }
    }

    /// IN2 level
    pub fn in2_high(&self) -> bool {
        match self.state {
            Tb6612State::Drive => self.direction == Direction::CounterClockwise,
            Tb6612State::Brake => true,
            _ => false,
        }
    }

    /// STBY level (active-low: high = bridge awake)
    pub fn standby_high(&self) -> bool {
        self.enabled
    }

    /// PWM duty percentage to apply
    ///
    /// Coast needs PWM held high (IN1/IN2 low + PWM high is the stop
    /// mode); brake and standby don't care, so they return 0.
    pub fn duty_percent(&self) -> u8 {
        match self.state {
            Tb6612State::Drive => self.speed,
            Tb6612State::Coast => 100,
            Tb6612State::Brake | Tb6612State::Standby => 0,
        }
    }
}

impl MotorDriver for Tb6612Motor {
    fn set_direction(&mut self, dir: Direction) {
        // Only allow direction change while not driving
        if self.state != Tb6612State::Drive {
            self.direction = dir;
        }
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }

    fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.state = if enabled {
            match self.state {
                Tb6612State::Standby => Tb6612State::Coast,
                other => other,
            }
        } else {
            Tb6612State::Standby
        };
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn start(&mut self) -> Result<(), MotorError> {
        if !self.enabled {
            return Err(MotorError::Disabled);
        }
        if self.speed == 0 {
            return Err(MotorError::InvalidSpeed);
        }
        self.state = Tb6612State::Drive;
        Ok(())
    }

    fn stop(&mut self) {
        if self.enabled {
            self.state = Tb6612State::Coast;
        }
    }

    fn brake(&mut self) {
        if self.enabled {
            self.state = Tb6612State::Brake;
        }
    }

    fn is_running(&self) -> bool {
        self.state == Tb6612State::Drive
    }
}
