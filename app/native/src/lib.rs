//! wintile - snap-assist style window tiling for X11.
//!
//! A long-running server owns the display connection and tiles the focused
//! window in response to directional commands. Commands arrive over a local
//! TCP channel, typically from `wintile client` bound to a hotkey.

pub mod cli;
pub mod config;
pub mod error;
pub mod ipc;
pub mod platform;
pub mod schema;
pub mod tiling;
