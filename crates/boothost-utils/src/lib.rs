//!
//! Utility helpers shared across the bootstrap crates: log-line formatting and
//! wall-clock timestamps. Nothing here touches process state.
//!

pub mod format;
pub mod time;
