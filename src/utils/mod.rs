//! Utility modules shared by the commands

pub mod logger;
pub mod preview;
pub mod progress;
