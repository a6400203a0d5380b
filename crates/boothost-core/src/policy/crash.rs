//!
//! Crash reporting decisions.
//!

use crate::{
    ids::{ProcessRole, switches},
    model::ProcessInvocation,
    platform::Platform,
};

///
/// CrashSwitches
///
/// The two crash-related switches, captured once from the invocation.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CrashSwitches {
    pub enable: bool,
    pub disable: bool,
}

impl CrashSwitches {
    #[must_use]
    pub fn from_invocation(invocation: &ProcessInvocation) -> Self {
        Self {
            enable: invocation.has_switch(switches::ENABLE_CRASH_REPORTER),
            disable: invocation.has_switch(switches::DISABLE_CRASH_REPORTER),
        }
    }
}

///
/// collect_stats_consent
///
/// macOS and Windows defer to the persisted consent store. Everywhere else
/// reporting is on by default: the enable switch forces it on, otherwise the
/// disable switch turns it off.
///

#[must_use]
pub const fn collect_stats_consent(
    platform: Platform,
    switches: CrashSwitches,
    uploads_enabled: bool,
) -> bool {
    if platform.uses_consent_store() {
        return uploads_enabled;
    }

    switches.enable || !switches.disable
}

///
/// reporting_enforced_by_policy
///
/// Administrative policy placeholder: always enforced on the consent-store
/// platforms, not applicable elsewhere.
///

#[must_use]
pub const fn reporting_enforced_by_policy(platform: Platform) -> Option<bool> {
    if platform.uses_consent_store() {
        Some(true)
    } else {
        None
    }
}

///
/// CrashInitPlan
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CrashInitPlan {
    pub initial_client: bool,
}

///
/// plan_crash_init
///
/// Decide whether crash handling starts during pre-sandbox startup.
///
/// - macOS always starts it. The initial client is the main process, or a
///   relauncher installing from a disk image.
/// - Linux starts it when enabled by switch, except in the zygote, which
///   starts it per forked child instead.
/// - Windows starts it when enabled by switch.
///

#[must_use]
pub fn plan_crash_init(
    platform: Platform,
    role: &ProcessRole,
    invocation: &ProcessInvocation,
) -> Option<CrashInitPlan> {
    let enabled = invocation.has_switch(switches::ENABLE_CRASH_REPORTER);

    match platform {
        Platform::MacOs => {
            let dmg_relauncher = *role == ProcessRole::RELAUNCHER
                && invocation.has_switch(switches::RELAUNCHER_DMG_DEVICE);

            Some(CrashInitPlan {
                initial_client: role.is_main() || dmg_relauncher,
            })
        }
        Platform::Linux => (enabled && *role != ProcessRole::ZYGOTE).then(|| CrashInitPlan {
            initial_client: role.is_main(),
        }),
        Platform::Windows => enabled.then(|| CrashInitPlan {
            initial_client: role.is_main(),
        }),
    }
}

///
/// TESTS
///
