//! Public macro entry points.
//!
//! `build` hosts the build-script helper that validates and embeds the
//! configuration; `start` defines the process entry point.

pub mod build;
pub mod start;
