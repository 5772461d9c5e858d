//! Pulse sensor drivers

pub mod pulse;

pub use pulse::{AdcReader, BeatDetector, PpgSensor, PulseSmoother};
