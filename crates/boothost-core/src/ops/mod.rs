//! Side-effecting collaborators consumed by bootstrap.
//!
//! Each concern is a trait with one native implementation. The sequencer only
//! ever talks to the traits, so hosts can swap any of them out.

pub mod crash;
pub mod env;
pub mod hooks;
pub mod logging;
pub mod paths;
pub mod profiling;
