//!
//! The bootstrap sequencer.
//!
//! Owns the canonical invocation, the role and every collaborator for the
//! lifetime of the process. Phase methods return `Err` only for invariant
//! violations; everything else is logged and bootstrap carries on. `run`
//! turns those errors into a process abort.
//!

use crate::{
    Error, ErrorOrigin,
    config::BootstrapConfig,
    dispatch::{DispatchTable, MainFunctionParams},
    ids::{PathKey, ProcessRole, switches},
    lifecycle::{
        fatal,
        phase::{BootstrapPhase, check_transition},
    },
    log,
    log::Topic,
    model::ProcessInvocation,
    ops::{
        crash::{ConsentStore, CrashBackend, LogCrashBackend, StaticConsent},
        env::{EnvOps, Environment, ProcessEnvironment},
        hooks::{HookError, NativeOsHooks, OsHooks},
        logging::{FileLogging, FileRetention, LoggingInit},
        paths::{DirsPathProvider, PathOverrides, PathProvider, PathTable},
        profiling::{NoopProfiler, Profiler},
    },
    platform::{BuildTarget, Platform},
    policy::{self, crash::plan_crash_init, packaging, sandbox},
    workflow::{
        client::{ClientFactory, ClientKind, ClientProvider, ContentClient, RoleClient},
        crash::CrashReporterClient,
        user_data::{UserDataLocator, component_dir},
    },
};
use std::{path::Path, sync::Arc};

///
/// Collaborators
///
/// Everything the sequencer talks to outside its own decision logic.
///

pub struct Collaborators {
    pub environment: Box<dyn Environment>,
    pub paths: Box<dyn PathProvider>,
    pub overrides: Box<dyn PathOverrides>,
    pub consent: Arc<dyn ConsentStore>,
    pub crash: Box<dyn CrashBackend>,
    pub logging: Box<dyn LoggingInit>,
    pub profiler: Box<dyn Profiler>,
    pub hooks: Box<dyn OsHooks>,
    pub clients: Box<dyn ClientProvider>,
}

impl Collaborators {
    /// The production wiring: real environment, `dirs` defaults, file
    /// logging and native OS hooks. Crash uploads are off until a host
    /// supplies a consent store.
    #[must_use]
    pub fn native(
        platform: Platform,
        config: &BootstrapConfig,
        clients: Box<dyn ClientProvider>,
    ) -> Self {
        Self {
            environment: Box::new(ProcessEnvironment),
            paths: Box::new(DirsPathProvider::new(platform, config.vendor_dir.clone())),
            overrides: Box::new(PathTable::new()),
            consent: Arc::new(StaticConsent(false)),
            crash: Box::new(LogCrashBackend::new()),
            logging: Box::new(FileLogging::new()),
            profiler: Box::new(NoopProfiler),
            hooks: Box::new(NativeOsHooks::new()),
            clients,
        }
    }
}

///
/// BootstrapSequencer
///

pub struct BootstrapSequencer {
    platform: Platform,
    build: BuildTarget,
    config: BootstrapConfig,
    phase: BootstrapPhase,

    invocation: ProcessInvocation,
    role: ProcessRole,

    env: Box<dyn Environment>,
    paths: Box<dyn PathProvider>,
    overrides: Box<dyn PathOverrides>,
    consent: Arc<dyn ConsentStore>,
    crash: Box<dyn CrashBackend>,
    logging: Box<dyn LoggingInit>,
    profiler: Box<dyn Profiler>,
    hooks: Box<dyn OsHooks>,

    clients: ClientFactory,
    content: Option<Box<dyn ContentClient>>,
    dispatch: DispatchTable,
    user_data: UserDataLocator,
    crash_client: Option<&'static CrashReporterClient>,
}

impl BootstrapSequencer {
    /// Take ownership of the canonical invocation and identify the role.
    /// The role is derived here, once, and never re-read from the switches.
    #[must_use]
    pub fn new(
        platform: Platform,
        config: BootstrapConfig,
        invocation: ProcessInvocation,
        collaborators: Collaborators,
        dispatch: DispatchTable,
    ) -> Self {
        let role = policy::identify_role(&invocation);
        log::set_role_label(role.label());

        let Collaborators {
            environment,
            paths,
            overrides,
            consent,
            crash,
            logging,
            profiler,
            hooks,
            clients,
        } = collaborators;

        Self {
            platform,
            build: BuildTarget::current(),
            user_data: UserDataLocator::new(platform, &config),
            config,
            phase: BootstrapPhase::Created,
            invocation,
            clients: ClientFactory::new(role.clone(), clients),
            role,
            env: environment,
            paths,
            overrides,
            consent,
            crash,
            logging,
            profiler,
            hooks,
            content: None,
            dispatch,
            crash_client: None,
        }
    }

    #[must_use]
    pub fn with_build_target(mut self, build: BuildTarget) -> Self {
        self.build = build;
        self
    }

    // -------- Accessors --------

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub const fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    #[must_use]
    pub const fn role(&self) -> &ProcessRole {
        &self.role
    }

    #[must_use]
    pub const fn invocation(&self) -> &ProcessInvocation {
        &self.invocation
    }

    #[must_use]
    pub const fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    #[must_use]
    pub fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    #[must_use]
    pub fn path_overrides(&self) -> &dyn PathOverrides {
        self.overrides.as_ref()
    }

    /// The resolved user-data directory; `None` before pre-sandbox startup
    /// or when nothing could be resolved.
    #[must_use]
    pub fn user_data_dir(&self) -> Option<&Path> {
        self.user_data
            .resolved()
            .filter(|dir| dir.is_resolved())
            .map(|dir| dir.path.as_path())
    }

    #[must_use]
    pub const fn crash_client(&self) -> Option<&'static CrashReporterClient> {
        self.crash_client
    }

    #[must_use]
    pub fn content_client(&self) -> Option<&dyn ContentClient> {
        self.content.as_deref()
    }

    pub fn client_factory(&mut self) -> &mut ClientFactory {
        &mut self.clients
    }

    /// The client this process's role owns, created on first access.
    pub fn role_client(&mut self) -> &dyn RoleClient {
        let kind = ClientKind::for_role(&self.role);
        self.clients.get(kind)
    }

    // -------- Phases --------

    /// Phase 1. Best-effort process setup; hook failures are logged only.
    pub fn basic_startup_complete(&mut self) -> Result<(), Error> {
        self.advance(BootstrapPhase::BasicStartupComplete)?;

        if self.platform == Platform::MacOs {
            let treadmill = sandbox::zombie_treadmill(&self.role);
            report_hook("zombies", self.hooks.enable_zombies(treadmill));
        }

        self.profiler.process_started();

        if self.platform == Platform::Windows {
            if self.build.use_handle_hooks() {
                report_hook("handle hooks", self.hooks.install_handle_hooks());
            } else {
                report_hook("handle verifier", self.hooks.disable_handle_verifier());
            }
            report_hook(
                "invalid parameter handler",
                self.hooks.ignore_invalid_parameters(),
            );
        }

        self.content = Some(self.clients.provider().create_content_client());
        log!(Topic::Init, Info, "basic startup complete on {}", self.platform);

        Ok(())
    }

    /// Phase 2. The last point with unrestricted disk and environment
    /// access.
    pub fn pre_sandbox_startup(&mut self) -> Result<(), Error> {
        self.advance(BootstrapPhase::PreSandboxStartup)?;

        self.start_crash_reporting()?;
        self.resolve_user_data();

        if self.platform.logs_before_sandbox() {
            self.init_logging();
        }

        EnvOps::apply_upstream_defaults(self.env.as_mut(), &self.config.upstream_api);

        if sandbox::runs_utility_pre_sandbox(&self.role) {
            log!(Topic::Sandbox, Debug, "utility pre-sandbox startup");
            self.clients.provider().utility_pre_sandbox_startup();
        }

        if sandbox::disables_setuid_sandbox(self.platform, &self.role) {
            self.invocation
                .append_switch(switches::DISABLE_SETUID_SANDBOX);
            log!(Topic::Sandbox, Debug, "setuid sandbox disabled");
        }

        self.crash.set_crash_keys(&self.invocation);

        Ok(())
    }

    /// Phase 3. Runs once the host has engaged the sandbox.
    pub fn sandbox_initialized(&mut self) -> Result<(), Error> {
        self.advance(BootstrapPhase::SandboxInitialized)?;

        if self.platform == Platform::Windows {
            self.init_logging();
            // sandbox setup can reset the error mode
            report_hook("error dialogs", self.hooks.suppress_error_dialogs());
        }

        Ok(())
    }

    /// Phase 4. `Some(code)` when a special-role entry point ran; `None`
    /// when the host should continue with its normal per-role startup.
    pub fn run_process(&mut self) -> Result<Option<i32>, Error> {
        self.advance(BootstrapPhase::Running)?;

        let params = MainFunctionParams {
            invocation: &self.invocation,
            role: &self.role,
        };
        let code = self.dispatch.dispatch(&self.role, &params);
        if code.is_none() {
            log!(
                Topic::Dispatch,
                Debug,
                "no special entry point for {}",
                self.role.label()
            );
        }

        Ok(code)
    }

    /// Phase 5. Only reached on orderly shutdown.
    pub fn process_exiting(&mut self) -> Result<(), Error> {
        self.advance(BootstrapPhase::Exiting)?;

        log!(Topic::Shutdown, Info, "process exiting");
        self.logging.cleanup();
        log::flush();

        Ok(())
    }

    /// Drive phases 1 to 4, aborting on any invariant violation.
    pub fn run(&mut self) -> Option<i32> {
        let phases: [fn(&mut Self) -> Result<(), Error>; 3] = [
            Self::basic_startup_complete,
            Self::pre_sandbox_startup,
            Self::sandbox_initialized,
        ];

        for phase in phases {
            if let Err(err) = phase(self) {
                fatal(self.phase, err);
            }
        }

        match self.run_process() {
            Ok(code) => code,
            Err(err) => fatal(self.phase, err),
        }
    }

    // -------- Fork re-entry --------

    /// Reduced re-initialization in a child created by duplicating a zygote
    /// process. Phases 1 to 3 are not replayed: the child inherits them, but
    /// must restart the profiling and crash state tied to the parent's
    /// process identity.
    pub fn zygote_forked(&mut self, invocation: ProcessInvocation) -> Result<(), Error> {
        if self.platform != Platform::Linux {
            return Err(Error::invariant(
                ErrorOrigin::Lifecycle,
                format!("fork re-entry is not supported on {}", self.platform),
            ));
        }
        let Some(client) = self.crash_client else {
            return Err(Error::invariant(
                ErrorOrigin::Lifecycle,
                format!("fork re-entry before pre-sandbox startup (at {})", self.phase),
            ));
        };

        self.role = policy::identify_role(&invocation);
        self.invocation = invocation;
        self.clients.rebind(self.role.clone());
        log::set_role_label(self.role.label());

        self.profiler.process_started();
        if self.profiler.being_profiled() {
            self.profiler.restart_after_fork();
            let hook = self.profiler.shutdown_hook();
            report_hook(
                "termination handler",
                self.hooks.install_termination_handler(hook),
            );
        }

        if self.invocation.has_switch(switches::ENABLE_CRASH_REPORTER) {
            let identity = client.product_identity();
            log!(
                Topic::Fork,
                Info,
                "crash reporting restarted for {} ({} {})",
                self.role.label(),
                identity.name,
                identity.version
            );
            self.crash.initialize(&self.role, false);
            self.crash.set_crash_keys(&self.invocation);
        }

        Ok(())
    }

    // -------- Helpers --------

    fn advance(&mut self, to: BootstrapPhase) -> Result<(), Error> {
        check_transition(self.phase, to)?;
        self.phase = to;
        log!(Topic::Init, Debug, "entering {to}");

        Ok(())
    }

    fn start_crash_reporting(&mut self) -> Result<(), Error> {
        let client = CrashReporterClient::new(
            self.platform,
            &self.invocation,
            &self.config.product_identity(),
            self.consent.clone(),
        )
        .install();

        self.crash.register_client(client);
        self.crash_client = Some(client);

        match plan_crash_init(self.platform, &self.role, &self.invocation) {
            Some(plan) => self.crash.initialize(&self.role, plan.initial_client),
            None => log!(
                Topic::Crash,
                Debug,
                "crash reporting not started for {}",
                self.role.label()
            ),
        }

        if self.platform == Platform::MacOs {
            let background_only = self.hooks.is_background_only_process();
            packaging::check_role_packaging(self.platform, background_only, &self.invocation)?;
        }

        Ok(())
    }

    fn resolve_user_data(&mut self) {
        let dir = self
            .user_data
            .resolve(
                &mut self.invocation,
                self.env.as_ref(),
                self.paths.as_ref(),
                self.overrides.as_mut(),
            )
            .clone();

        if !dir.is_resolved() {
            log!(Topic::Paths, Error, "could not create user data dir");
            return;
        }

        let components = component_dir(&dir.path);
        if let Err(err) =
            self.overrides
                .override_and_create(PathKey::ComponentUser, &components, true)
        {
            log!(Topic::Paths, Warn, "component dir: {err}");
        }
    }

    fn init_logging(&mut self) {
        let retention = FileRetention::for_role(&self.role);
        let user_data = self
            .user_data
            .resolved()
            .filter(|dir| dir.is_resolved())
            .map(|dir| dir.path.as_path());

        if let Err(err) = self.logging.init(&self.invocation, retention, user_data) {
            log!(Topic::Init, Warn, "file logging unavailable: {err}");
        }
    }
}

fn report_hook(name: &str, result: Result<(), HookError>) {
    match result {
        Ok(()) => log!(Topic::Hooks, Debug, "{name}: installed"),
        Err(err) if err.is_unavailable() => log!(Topic::Hooks, Debug, "{err}"),
        Err(err) => log!(Topic::Hooks, Warn, "{err}"),
    }
}
