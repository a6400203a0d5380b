//!
//! Crash subsystem boundary.
//!
//! The crash uploader and its transport live outside this crate. Bootstrap
//! only registers the policy client, asks the backend to start, and hands
//! over crash keys derived from the invocation.
//!

use crate::{
    ids::ProcessRole,
    log,
    log::Topic,
    model::ProcessInvocation,
    workflow::crash::CrashReporterClient,
};

///
/// ConsentStore
///
/// Persisted user consent for crash uploads, read-only from bootstrap.
///

pub trait ConsentStore: Send + Sync {
    fn uploads_enabled(&self) -> bool;
}

///
/// StaticConsent
///
/// Consent fixed at build or launch time.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StaticConsent(pub bool);

impl ConsentStore for StaticConsent {
    fn uploads_enabled(&self) -> bool {
        self.0
    }
}

///
/// CrashBackend
///

pub trait CrashBackend {
    /// Called exactly once per process, before any `initialize`.
    fn register_client(&mut self, client: &'static CrashReporterClient);

    /// Start crash handling for `role`. `initial_client` marks the process
    /// that owns the crash handler for the whole process tree.
    fn initialize(&mut self, role: &ProcessRole, initial_client: bool);

    /// Attach invocation-derived annotations to future crash reports.
    fn set_crash_keys(&mut self, invocation: &ProcessInvocation);
}

///
/// LogCrashBackend
///
/// Backend for builds without a crash uploader: records what would have
/// been started in the bootstrap log.
///

#[derive(Debug, Default)]
pub struct LogCrashBackend {
    client: Option<&'static CrashReporterClient>,
}

impl LogCrashBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self { client: None }
    }
}

impl CrashBackend for LogCrashBackend {
    fn register_client(&mut self, client: &'static CrashReporterClient) {
        let identity = client.product_identity();
        log!(
            Topic::Crash,
            Debug,
            "client registered for {} {}",
            identity.name,
            identity.version
        );
        self.client = Some(client);
    }

    fn initialize(&mut self, role: &ProcessRole, initial_client: bool) {
        let consent = self
            .client
            .is_some_and(CrashReporterClient::collect_stats_consent);
        log!(
            Topic::Crash,
            Info,
            "crash reporting for {} (initial={initial_client}, consent={consent})",
            role.label()
        );
    }

    fn set_crash_keys(&mut self, invocation: &ProcessInvocation) {
        log!(
            Topic::Crash,
            Debug,
            "crash keys from {} switches",
            invocation.switches().count()
        );
    }
}
