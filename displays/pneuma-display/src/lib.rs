//! Display abstraction and watch face renderer for Pneuma
//!
//! This crate provides:
//! - `DisplayBackend` trait for different panel types (OLED, memory LCD)
//! - `Screen` character buffer with dirty tracking
//! - `Renderer` that turns session snapshots into watch face lines
//!
//! # Architecture
//!
//! Board code implements `DisplayBackend` with its panel-specific driver.
//! The renderer only writes into a `Screen`; a display task diffs and
//! flushes dirty screens to the backend, so rendering never blocks on
//! panel I/O.

#![no_std]

pub mod backend;
pub mod render;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use render::Renderer;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
