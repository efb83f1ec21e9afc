//! embedded-hal pin adapter for the TB6612 driver
//!
//! Owns the IN1/IN2/STBY GPIOs and the PWM channel and writes the levels
//! computed by [`Tb6612Motor`] to them. Called from the firmware tick loop
//! after `update_with_delta`.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use super::tb6612::Tb6612Motor;

/// Errors from applying driver state to pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// A GPIO write failed
    Gpio,
    /// Setting the PWM duty cycle failed
    Pwm,
}

/// The pin set of one TB6612 channel
pub struct HBridgeOutputs<I1, I2, ST, P> {
    in1: I1,
    in2: I2,
    standby: ST,
    pwm: P,
}

impl<I1, I2, ST, P> HBridgeOutputs<I1, I2, ST, P>
where
    I1: OutputPin,
    I2: OutputPin,
    ST: OutputPin,
    P: SetDutyCycle,
{
    /// Take ownership of the channel's pins
    pub fn new(in1: I1, in2: I2, standby: ST, pwm: P) -> Self {
        Self {
            in1,
            in2,
            standby,
            pwm,
        }
    }

    /// Write the driver's current state to the pins
    ///
    /// Inputs and duty are written before STBY, so the bridge never wakes
    /// into a stale input combination.
    pub fn apply(&mut self, motor: &Tb6612Motor) -> Result<(), OutputError> {
        self.in1
            .set_state(PinState::from(motor.in1_high()))
            .map_err(|_| OutputError::Gpio)?;
        self.in2
            .set_state(PinState::from(motor.in2_high()))
            .map_err(|_| OutputError::Gpio)?;
        self.pwm
            .set_duty_cycle_percent(motor.duty_percent())
            .map_err(|_| OutputError::Pwm)?;
        self.standby
            .set_state(PinState::from(motor.standby_high()))
            .map_err(|_| OutputError::Gpio)?;
        Ok(())
    }

    /// Give the pins back
    pub fn release(self) -> (I1, I2, ST, P) {
        (self.in1, self.in2, self.standby, self.pwm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::tb6612::{Tb6612Config, Tb6612State};
    use core::convert::Infallible;
    use remontoire_core::traits::MotorDriver;

    #[derive(Default)]
    struct FakePin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePwm {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            100
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn outputs() -> HBridgeOutputs<FakePin, FakePin, FakePin, FakePwm> {
        HBridgeOutputs::new(
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
            FakePwm::default(),
        )
    }

    #[test]
    fn test_apply_drive() {
        let mut motor = Tb6612Motor::new(Tb6612Config::default());
        motor.enable(true);
        motor.start().unwrap();

        let mut out = outputs();
        out.apply(&motor).unwrap();

        let (in1, in2, standby, pwm) = out.release();
        assert!(in1.high);
        assert!(!in2.high);
        assert!(standby.high);
        assert_eq!(pwm.duty, 60);
    }

    #[test]
    fn test_apply_brake() {
        let mut motor = Tb6612Motor::new(Tb6612Config::default());
        motor.enable(true);
        motor.start().unwrap();
        motor.brake();
        assert_eq!(motor.state(), Tb6612State::Brake);

        let mut out = outputs();
        out.apply(&motor).unwrap();

        let (in1, in2, _, pwm) = out.release();
        assert!(in1.high);
        assert!(in2.high);
        assert_eq!(pwm.duty, 0);
    }

    #[test]
    fn test_apply_standby() {
        let motor = Tb6612Motor::new(Tb6612Config::default());

        let mut out = outputs();
        out.apply(&motor).unwrap();

        let (in1, in2, standby, pwm) = out.release();
        assert!(!in1.high);
        assert!(!in2.high);
        assert!(!standby.high);
        assert_eq!(pwm.duty, 0);
    }
}
