use crate::{
    doubles::{RecordingCrashBackend, RecordingHooks, RecordingLogging, RecordingProfiler, StubClients},
    journal::Journal,
};
use boothost_core::{
    config::BootstrapConfig,
    dispatch::DispatchTable,
    lifecycle::{BootstrapSequencer, Collaborators},
    model::ProcessInvocation,
    ops::{crash::StaticConsent, env::MemoryEnvironment, paths::{PathTable, StaticPathProvider}},
    platform::{BuildTarget, Platform},
};
use std::{
    ffi::OsString,
    path::PathBuf,
    sync::Arc,
};
use tempfile::TempDir;

///
/// TestHost
///
/// Builder for a fully doubled bootstrap: a private app-data root under a
/// temp dir, an in-memory environment and recording collaborators.
///

pub struct TestHost {
    tmp: TempDir,
    platform: Platform,
    build: BuildTarget,
    config: BootstrapConfig,
    args: Vec<String>,
    env: MemoryEnvironment,
    consent: bool,
    background_only: bool,
    being_profiled: bool,
    failing_hooks: bool,
    failing_logging: bool,
    dispatch: DispatchTable,
    journal: Journal,
}

impl TestHost {
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            tmp: tempfile::tempdir().expect("create temp dir"),
            platform,
            build: BuildTarget {
                debug_assertions: false,
                pointer_width_64: true,
            },
            config: BootstrapConfig::default(),
            args: Vec::new(),
            env: MemoryEnvironment::new(),
            consent: false,
            background_only: false,
            being_profiled: false,
            failing_hooks: false,
            failing_logging: false,
            dispatch: DispatchTable::new(),
            journal: Journal::new(),
        }
    }

    /// Invocation arguments, without the program name.
    #[must_use]
    pub fn args<S: AsRef<str>>(mut self, args: &[S]) -> Self {
        self.args = args.iter().map(|a| a.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn env(mut self, name: &str, value: impl Into<OsString>) -> Self {
        self.env = self.env.with(name, value);
        self
    }

    #[must_use]
    pub fn config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn build_target(mut self, build: BuildTarget) -> Self {
        self.build = build;
        self
    }

    #[must_use]
    pub const fn consent(mut self, uploads_enabled: bool) -> Self {
        self.consent = uploads_enabled;
        self
    }

    #[must_use]
    pub const fn background_only(mut self, background_only: bool) -> Self {
        self.background_only = background_only;
        self
    }

    #[must_use]
    pub const fn being_profiled(mut self, being_profiled: bool) -> Self {
        self.being_profiled = being_profiled;
        self
    }

    #[must_use]
    pub const fn failing_hooks(mut self) -> Self {
        self.failing_hooks = true;
        self
    }

    #[must_use]
    pub const fn failing_logging(mut self) -> Self {
        self.failing_logging = true;
        self
    }

    #[must_use]
    pub fn dispatch(mut self, table: DispatchTable) -> Self {
        self.dispatch = table;
        self
    }

    // -------- Inspection --------

    #[must_use]
    pub const fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Root that relative user-data switches resolve against.
    #[must_use]
    pub fn app_data(&self) -> PathBuf {
        self.tmp.path().join("appdata")
    }

    #[must_use]
    pub fn default_user_data(&self) -> PathBuf {
        self.app_data().join(&self.config.vendor_dir)
    }

    #[must_use]
    pub fn invocation(&self) -> ProcessInvocation {
        ProcessInvocation::from_args(std::iter::once("host").chain(self.args.iter().map(String::as_str)))
    }

    // -------- Assembly --------

    #[must_use]
    pub fn collaborators(&self) -> Collaborators {
        let mut hooks = RecordingHooks::new(self.journal.clone(), self.background_only);
        if self.failing_hooks {
            hooks = hooks.failing();
        }
        let mut logging = RecordingLogging::new(self.journal.clone());
        if self.failing_logging {
            logging = logging.failing();
        }

        Collaborators {
            environment: Box::new(self.env.clone()),
            paths: Box::new(StaticPathProvider::new(
                self.app_data(),
                self.config.vendor_dir.clone(),
            )),
            overrides: Box::new(PathTable::new()),
            consent: Arc::new(StaticConsent(self.consent)),
            crash: Box::new(RecordingCrashBackend::new(self.journal.clone())),
            logging: Box::new(logging),
            profiler: Box::new(RecordingProfiler::new(
                self.journal.clone(),
                self.being_profiled,
            )),
            hooks: Box::new(hooks),
            clients: Box::new(StubClients::new(self.journal.clone())),
        }
    }

    #[must_use]
    pub fn sequencer(&self) -> BootstrapSequencer {
        BootstrapSequencer::new(
            self.platform,
            self.config.clone(),
            self.invocation(),
            self.collaborators(),
            self.dispatch.clone(),
        )
        .with_build_target(self.build)
    }
}
