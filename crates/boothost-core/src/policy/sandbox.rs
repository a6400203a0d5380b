//!
//! Sandbox-related role decisions.
//!

use crate::{ids::ProcessRole, platform::Platform};

/// Linux runs every child role without the setuid sandbox helper.
#[must_use]
pub fn disables_setuid_sandbox(platform: Platform, role: &ProcessRole) -> bool {
    platform == Platform::Linux && !role.is_main()
}

/// Roles that receive the main process's task port on macOS. Auxiliary
/// programs sharing the executable are not content processes and don't.
#[must_use]
pub fn should_send_mach_port(role: &ProcessRole) -> bool {
    *role != ProcessRole::RELAUNCHER && *role != ProcessRole::PRINT_SERVICE
}

/// The relauncher installs its own sandbox once it knows what it relaunches.
#[must_use]
pub fn delay_sandbox_initialization(role: &ProcessRole) -> bool {
    *role == ProcessRole::RELAUNCHER
}

/// Zombie treadmill depth: the main process gets a longer one, since
/// crashes there have more impact.
#[must_use]
pub fn zombie_treadmill(role: &ProcessRole) -> usize {
    if role.is_main() { 10_000 } else { 1_000 }
}

/// Utility and zygote processes run the utility client's pre-sandbox hook.
#[must_use]
pub fn runs_utility_pre_sandbox(role: &ProcessRole) -> bool {
    *role == ProcessRole::UTILITY || *role == ProcessRole::ZYGOTE
}

///
/// TESTS
///
