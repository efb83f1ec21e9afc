//! Board-agnostic winder logic for the Remontoire watch winder
//!
//! This crate contains all controller logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction trait for the winder motor
//! - The [`winder::WatchWinder`] pulse-queue controller
//! - Winding-plan math (turns per day into sessions and intervals)
//! - Daily turn budget
//! - Configuration type definitions
//!
//! The crate is polled: the owning firmware calls
//! [`winder::WatchWinder::update_with_delta`] from its tick loop and applies
//! the motor driver's outputs to hardware. Deciding *when* to fire winding
//! sessions over the day is left to the caller; [`plan::WindingPlan`] tells
//! it how often.

#![no_std]
#![deny(unsafe_code)]

pub mod budget;
pub mod config;
pub mod plan;
pub mod traits;
pub mod winder;
