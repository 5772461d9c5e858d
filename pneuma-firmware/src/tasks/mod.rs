//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod controller;
pub mod display;
pub mod haptic;
pub mod heart_rate;
pub mod tick;

pub use buttons::button_task;
pub use controller::controller_task;
pub use display::display_task;
pub use haptic::haptic_task;
pub use heart_rate::heart_rate_task;
pub use tick::tick_task;
