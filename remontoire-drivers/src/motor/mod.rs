//! Winder motor drivers
//!
//! The driver is split in two: [`tb6612::Tb6612Motor`] models one TB6612FNG
//! channel at logic level (testable on host), and
//! [`outputs::HBridgeOutputs`] writes that state to real pins.

pub mod outputs;
pub mod tb6612;

pub use outputs::{HBridgeOutputs, OutputError};
pub use tb6612::{Tb6612Config, Tb6612Motor, Tb6612State};
