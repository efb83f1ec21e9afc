//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in remontoire-core:
//!
//! - TB6612FNG H-bridge logic implementing the winder motor trait
//! - An embedded-hal adapter applying driver state to GPIO/PWM pins

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
