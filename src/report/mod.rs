//! Report generation, snapshotting, and display.

pub mod display;
pub mod generate;
pub mod snapshot;
pub mod types;
