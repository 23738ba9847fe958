//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window-system events into `InputEvent`s.

mod types;

pub(crate) mod platform;

pub use types::{InputEvent, Key, KeyState};
