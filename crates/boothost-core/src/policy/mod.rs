//! Deterministic decision rules.
//!
//! Policies are pure: they take the platform, the role and plain flags and
//! return a decision. They never read the environment, touch the disk, or
//! log.

pub mod crash;
pub mod packaging;
pub mod sandbox;

use crate::{ids::ProcessRole, model::ProcessInvocation};

/// Derive the role of this process from its invocation.
#[must_use]
pub fn identify_role(invocation: &ProcessInvocation) -> ProcessRole {
    ProcessRole::from_invocation(invocation)
}
