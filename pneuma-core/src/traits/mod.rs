//! Hardware abstraction traits
//!
//! These traits define the interface between the session logic and
//! hardware-specific implementations.

pub mod haptic;
pub mod sensor;

pub use haptic::HapticSink;
pub use sensor::{PulseSensor, SensorError};
