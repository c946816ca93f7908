//! Command implementations for the linedrop CLI

pub mod dispatch;

// Re-export main dispatcher functions for flat access from main.rs
pub use dispatch::{run_dispatch, run_drain};
