//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pneuma-core for the wrist device's peripherals:
//!
//! - Haptic driver (vibration motor on a GPIO, per-cue pulse patterns)
//! - Pulse sensor (PPG front-end via ADC, smoothing and beat detection)

#![no_std]
#![deny(unsafe_code)]

pub mod haptic;
pub mod sensor;
