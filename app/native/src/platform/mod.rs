//! Small OS-level helpers shared across wintile.

pub mod path;
pub mod thread;
