//! Reference host executable.
//!
//! Wires native collaborators and stub role clients into the sequencer. The
//! relauncher and print-service roles run as special entry points sharing
//! this executable; every other role ends up in `boothost_main`.

use boothost::{core::policy::sandbox, prelude::*};
use std::process::Command;

boothost::start!();

fn boothost_collaborators(platform: Platform, config: &BootstrapConfig) -> Collaborators {
    Collaborators::native(platform, config, Box::new(ShellClients))
}

fn boothost_dispatch_table(platform: Platform) -> DispatchTable {
    DispatchTable::standard(
        platform,
        SpecialEntryPoints {
            relauncher: relauncher_main,
            print_service: Some(print_service_main),
        },
    )
}

fn boothost_main(sequencer: &mut BootstrapSequencer) -> i32 {
    let platform = sequencer.platform();
    let role = sequencer.role().clone();

    if platform == Platform::MacOs {
        boothost::log!(
            Topic::Sandbox,
            Debug,
            "{}: send task port={} delay sandbox={}",
            role.label(),
            sandbox::should_send_mach_port(&role),
            sandbox::delay_sandbox_initialization(&role)
        );
    }

    let client = sequencer.role_client();
    boothost::log!(
        Topic::Client,
        Ok,
        "{} running with the {} client ({})",
        role.label(),
        client.kind(),
        client.name()
    );

    0
}

// -------- special roles --------

/// Wait for the program after `--` and exit with its status.
fn relauncher_main(params: &MainFunctionParams<'_>) -> i32 {
    let Some((program, args)) = params.invocation.args().split_first() else {
        boothost::log!(Topic::Dispatch, Error, "relauncher: nothing to relaunch");
        return 1;
    };

    match Command::new(program).args(args).status() {
        Ok(status) => status.code().unwrap_or(1),
        Err(err) => {
            boothost::log!(Topic::Dispatch, Error, "relauncher: {program}: {err}");
            1
        }
    }
}

fn print_service_main(params: &MainFunctionParams<'_>) -> i32 {
    boothost::log!(
        Topic::Dispatch,
        Info,
        "print service started ({} pending jobs)",
        params.invocation.args().len()
    );

    0
}

// -------- clients --------

///
/// ShellClients
///

struct ShellClients;

impl ClientProvider for ShellClients {
    fn create_content_client(&self) -> Box<dyn ContentClient> {
        Box::new(ShellContent)
    }

    fn create_client(&self, kind: ClientKind) -> Box<dyn RoleClient> {
        Box::new(ShellClient(kind))
    }

    fn utility_pre_sandbox_startup(&self) {
        boothost::log!(Topic::Client, Debug, "utility pre-sandbox startup");
    }
}

struct ShellContent;

impl ContentClient for ShellContent {
    fn name(&self) -> &str {
        "shell-content"
    }
}

struct ShellClient(ClientKind);

impl RoleClient for ShellClient {
    fn kind(&self) -> ClientKind {
        self.0
    }

    fn name(&self) -> &str {
        match self.0 {
            ClientKind::Browser => "shell-browser",
            ClientKind::Renderer => "shell-renderer",
            ClientKind::Utility => "shell-utility",
        }
    }
}
