//!
//! The crash-reporter client.
//!
//! Constructed once during pre-sandbox startup and then leaked: late crashes
//! during teardown must still be attributable, so the client is never
//! dropped. The crash backend and the fork re-entry path hold the same
//! `&'static` reference.
//!

use crate::{
    model::{ProcessInvocation, ProductIdentity},
    ops::crash::ConsentStore,
    platform::Platform,
    policy::crash::{self, CrashSwitches},
};
use std::{fmt, sync::Arc};

///
/// ProcessIdentity
///
/// OS-reported process identity strings, consumed by the Windows crash layer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessIdentity {
    pub product: String,
    pub version: String,
    pub channel: String,
    pub special_build: String,
}

///
/// CrashReporterClient
///

pub struct CrashReporterClient {
    identity: ProductIdentity,
    platform: Platform,
    switches: CrashSwitches,
    consent: Arc<dyn ConsentStore>,
}

impl CrashReporterClient {
    /// Build the client from the invocation. Product name and version are
    /// `defaults` unless overridden by the white-label switches.
    #[must_use]
    pub fn new(
        platform: Platform,
        invocation: &ProcessInvocation,
        defaults: &ProductIdentity,
        consent: Arc<dyn ConsentStore>,
    ) -> Self {
        Self {
            identity: ProductIdentity::from_invocation(invocation, defaults),
            platform,
            switches: CrashSwitches::from_invocation(invocation),
            consent,
        }
    }

    /// Leak the client for the rest of the process lifetime.
    #[must_use]
    pub fn install(self) -> &'static Self {
        Box::leak(Box::new(self))
    }

    #[must_use]
    pub const fn product_identity(&self) -> &ProductIdentity {
        &self.identity
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn collect_stats_consent(&self) -> bool {
        let uploads_enabled =
            self.platform.uses_consent_store() && self.consent.uploads_enabled();

        crash::collect_stats_consent(self.platform, self.switches, uploads_enabled)
    }

    // placeholder until administrative policy is wired in
    #[must_use]
    pub const fn reporting_enforced_by_policy(&self) -> Option<bool> {
        crash::reporting_enforced_by_policy(self.platform)
    }

    /// Whether the crash handler process should be watched with the costly
    /// monitoring mode. Never on any current platform.
    #[must_use]
    pub const fn should_monitor_crash_handler_expensively(&self) -> bool {
        false
    }

    /// Identity strings for the OS crash layer; Windows only.
    #[must_use]
    pub fn process_identity(&self) -> Option<ProcessIdentity> {
        match self.platform {
            Platform::Windows => Some(ProcessIdentity {
                product: self.identity.name.clone(),
                version: self.identity.version.clone(),
                channel: String::new(),
                special_build: String::new(),
            }),
            Platform::Linux | Platform::MacOs => None,
        }
    }
}

impl fmt::Debug for CrashReporterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrashReporterClient")
            .field("identity", &self.identity)
            .field("platform", &self.platform)
            .field("switches", &self.switches)
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
