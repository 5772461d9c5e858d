//! Board-agnostic core logic for the Pneuma breathing firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Breath session state machine (phases, rounds, timers)
//! - Haptic cue emission
//! - Configuration types and clamped adjusters
//! - Display text derivation
//! - Tick gate (cancellable periodic trigger guard)
//! - Button input mapping
//! - Hardware abstraction traits (haptic sink, pulse sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod gate;
pub mod input;
pub mod session;
pub mod traits;
