//! Multi-step bootstrap workflows.
//!
//! Workflows combine policy decisions with ops collaborators. They log their
//! own non-fatal failures and never abort; aborting is reserved for the
//! lifecycle layer.

pub mod client;
pub mod crash;
pub mod user_data;
