//! Shared helpers for the command line surface

pub mod progress;

pub use progress::*;
