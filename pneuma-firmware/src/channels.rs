//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use pneuma_core::input::ButtonEvent;
use pneuma_core::session::{HapticCue, SessionSnapshot};

/// Channel capacity for debounced button events
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Channel capacity for queued haptic cues
const CUE_CHANNEL_SIZE: usize = 8;

/// Debounced button events from the face buttons
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Haptic cues queued for the vibration motor
pub static CUE_CHANNEL: Channel<CriticalSectionRawMutex, HapticCue, CUE_CHANNEL_SIZE> =
    Channel::new();

/// Latest session snapshot for the display task
pub static SNAPSHOT: Signal<CriticalSectionRawMutex, SessionSnapshot> = Signal::new();

/// Smoothed heart rate (0.1 bpm units), or None on sensor fault/off-wrist
pub static HR_READING: Signal<CriticalSectionRawMutex, Option<u16>> = Signal::new();
