//! Test utilities and fixtures for exercising the bootstrap layer.
//!
//! Provides recording doubles for every collaborator the sequencer talks to,
//! a shared [`Journal`] to assert on, and the [`TestHost`] builder that wires
//! them together over a temporary app-data root.

pub mod doubles;
pub mod host;
pub mod journal;

pub use host::TestHost;
pub use journal::{Event, Journal};
