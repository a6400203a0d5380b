//! Recording collaborator doubles.
//!
//! Each double appends to a shared [`Journal`] instead of touching the OS.

use crate::journal::{Event, Journal};
use boothost_core::{
    ids::ProcessRole,
    model::ProcessInvocation,
    ops::{
        crash::CrashBackend,
        hooks::{HookError, OsHooks},
        logging::{FileRetention, LoggingError, LoggingInit},
        profiling::Profiler,
    },
    workflow::{
        client::{ClientKind, ClientProvider, ContentClient, RoleClient},
        crash::CrashReporterClient,
    },
};
use std::path::Path;

///
/// RecordingCrashBackend
///

#[derive(Debug)]
pub struct RecordingCrashBackend {
    journal: Journal,
}

impl RecordingCrashBackend {
    #[must_use]
    pub const fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl CrashBackend for RecordingCrashBackend {
    fn register_client(&mut self, client: &'static CrashReporterClient) {
        let identity = client.product_identity();
        self.journal.record(Event::CrashClientRegistered {
            product: identity.name.clone(),
            version: identity.version.clone(),
        });
    }

    fn initialize(&mut self, role: &ProcessRole, initial_client: bool) {
        self.journal.record(Event::CrashInitialized {
            role: role.as_str().to_string(),
            initial_client,
        });
    }

    fn set_crash_keys(&mut self, invocation: &ProcessInvocation) {
        self.journal.record(Event::CrashKeysSet {
            switches: invocation.switches().map(|(n, _)| n.to_string()).collect(),
        });
    }
}

///
/// RecordingLogging
///

#[derive(Debug)]
pub struct RecordingLogging {
    journal: Journal,
    fail: bool,
}

impl RecordingLogging {
    #[must_use]
    pub const fn new(journal: Journal) -> Self {
        Self {
            journal,
            fail: false,
        }
    }

    /// Every `init` reports that no log location exists.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl LoggingInit for RecordingLogging {
    fn init(
        &mut self,
        _invocation: &ProcessInvocation,
        retention: FileRetention,
        user_data_dir: Option<&Path>,
    ) -> Result<(), LoggingError> {
        self.journal.record(Event::LoggingInit {
            retention,
            user_data: user_data_dir.map(Path::to_path_buf),
        });

        if self.fail {
            Err(LoggingError::NoLocation)
        } else {
            Ok(())
        }
    }

    fn cleanup(&mut self) {
        self.journal.record(Event::LoggingCleanup);
    }
}

///
/// RecordingProfiler
///

#[derive(Debug)]
pub struct RecordingProfiler {
    journal: Journal,
    being_profiled: bool,
}

impl RecordingProfiler {
    #[must_use]
    pub const fn new(journal: Journal, being_profiled: bool) -> Self {
        Self {
            journal,
            being_profiled,
        }
    }
}

fn shutdown_noop() {}

impl Profiler for RecordingProfiler {
    fn process_started(&self) {
        self.journal.record(Event::ProfilerStarted);
    }

    fn being_profiled(&self) -> bool {
        self.being_profiled
    }

    fn restart_after_fork(&self) {
        self.journal.record(Event::ProfilerRestarted);
    }

    fn shutdown_hook(&self) -> fn() {
        shutdown_noop
    }
}

///
/// RecordingHooks
///

#[derive(Debug)]
pub struct RecordingHooks {
    journal: Journal,
    background_only: bool,
    fail: bool,
}

impl RecordingHooks {
    #[must_use]
    pub const fn new(journal: Journal, background_only: bool) -> Self {
        Self {
            journal,
            background_only,
            fail: false,
        }
    }

    /// Every hook is recorded, then reports an OS error.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn hook(&self, name: &'static str, detail: String) -> Result<(), HookError> {
        self.journal.record(Event::Hook(detail));

        if self.fail {
            Err(HookError::Os {
                hook: name,
                code: 5,
            })
        } else {
            Ok(())
        }
    }
}

impl OsHooks for RecordingHooks {
    fn suppress_error_dialogs(&mut self) -> Result<(), HookError> {
        self.hook("error dialogs", "error_dialogs".into())
    }

    fn install_handle_hooks(&mut self) -> Result<(), HookError> {
        self.hook("handle hooks", "handle_hooks".into())
    }

    fn disable_handle_verifier(&mut self) -> Result<(), HookError> {
        self.hook("handle verifier", "handle_verifier".into())
    }

    fn ignore_invalid_parameters(&mut self) -> Result<(), HookError> {
        self.hook("invalid parameters", "invalid_parameters".into())
    }

    fn enable_zombies(&mut self, treadmill: usize) -> Result<(), HookError> {
        self.hook("zombies", format!("zombies:{treadmill}"))
    }

    fn install_termination_handler(&mut self, _on_terminate: fn()) -> Result<(), HookError> {
        self.hook("termination handler", "termination_handler".into())
    }

    fn is_background_only_process(&self) -> bool {
        self.background_only
    }
}

///
/// StubClients
///

#[derive(Debug)]
pub struct StubClients {
    journal: Journal,
}

impl StubClients {
    #[must_use]
    pub const fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

struct StubContent;

impl ContentClient for StubContent {
    fn name(&self) -> &str {
        "stub-content"
    }
}

struct StubRoleClient(ClientKind);

impl RoleClient for StubRoleClient {
    fn kind(&self) -> ClientKind {
        self.0
    }

    fn name(&self) -> &str {
        "stub"
    }
}

impl ClientProvider for StubClients {
    fn create_content_client(&self) -> Box<dyn ContentClient> {
        self.journal.record(Event::ContentClientCreated);
        Box::new(StubContent)
    }

    fn create_client(&self, kind: ClientKind) -> Box<dyn RoleClient> {
        self.journal.record(Event::ClientCreated(kind));
        Box::new(StubRoleClient(kind))
    }

    fn utility_pre_sandbox_startup(&self) {
        self.journal.record(Event::UtilityPreSandbox);
    }
}
