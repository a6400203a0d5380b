//! Boothost facade crate.
//!
//! This crate is the recommended dependency for host executables. It
//! re-exports the bootstrap layer and provides the macro entry points:
//!
//! - `build!` for `build.rs` (validate/embed `boothost.toml`)
//! - `start!` for `main.rs` (define `main` and hand control to the sequencer)
//!
//! A host crate using `start!` must define three functions at its root:
//!
//! ```ignore
//! fn boothost_collaborators(platform: Platform, config: &BootstrapConfig) -> Collaborators;
//! fn boothost_dispatch_table(platform: Platform) -> DispatchTable;
//! fn boothost_main(sequencer: &mut BootstrapSequencer) -> i32;
//! ```

mod macros;

pub use boothost_core as core;
pub use boothost_utils as utils;

pub use boothost_core::{
    Error, dispatch, ids, log,
    lifecycle::{BootstrapSequencer, Collaborators},
    model, platform,
};

use boothost_core::{
    config::BootstrapConfig,
    dispatch::DispatchTable,
    lifecycle::{self, BootstrapPhase},
    log::Topic,
    model::ProcessInvocation,
    platform::Platform,
};

// -----------------------------------------------------------------------------
// Constants
// -----------------------------------------------------------------------------

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// -----------------------------------------------------------------------------
// Prelude
// -----------------------------------------------------------------------------

///
/// Everything a host `main.rs` needs next to `start!`.
///

pub mod prelude {
    pub use crate::core::{
        config::BootstrapConfig,
        dispatch::{DispatchTable, MainFunctionParams, SpecialEntryPoints},
        ids::ProcessRole,
        lifecycle::{BootstrapSequencer, Collaborators},
        log::Topic,
        model::ProcessInvocation,
        platform::Platform,
        workflow::client::{ClientKind, ClientProvider, ContentClient, RoleClient},
    };
}

// -----------------------------------------------------------------------------
// Entry
// -----------------------------------------------------------------------------

pub type CollaboratorsFn = fn(Platform, &BootstrapConfig) -> Collaborators;
pub type DispatchTableFn = fn(Platform) -> DispatchTable;
pub type HostMainFn = fn(&mut BootstrapSequencer) -> i32;

///
/// HostHooks
///
/// The three user functions `start!` wires together.
///

#[derive(Clone, Copy, Debug)]
pub struct HostHooks {
    pub collaborators: CollaboratorsFn,
    pub dispatch_table: DispatchTableFn,
    pub host_main: HostMainFn,
}

/// Bootstrap the current process and return its exit code.
#[must_use]
pub fn run(
    config_str: &str,
    config_path: &str,
    invocation: ProcessInvocation,
    hooks: HostHooks,
) -> i32 {
    run_on(Platform::current(), config_str, config_path, invocation, hooks)
}

/// [`run`] for an explicit platform.
///
/// Runs phases 1 to 4. A special-role entry point's return value becomes the
/// exit code and nothing else runs. Otherwise the host's main loop runs, its
/// return value becomes the exit code, and the exit phase follows.
#[must_use]
pub fn run_on(
    platform: Platform,
    config_str: &str,
    config_path: &str,
    invocation: ProcessInvocation,
    hooks: HostHooks,
) -> i32 {
    // the build script already validated this document
    let config = match BootstrapConfig::from_toml(config_str) {
        Ok(config) => config,
        Err(err) => lifecycle::fatal(BootstrapPhase::Created, format!("{config_path}: {err}")),
    };

    let collaborators = (hooks.collaborators)(platform, &config);
    let table = (hooks.dispatch_table)(platform);
    let mut sequencer =
        BootstrapSequencer::new(platform, config, invocation, collaborators, table);

    // a matched entry point replaces the rest of bootstrap, exit phase included
    if let Some(code) = sequencer.run() {
        return code;
    }

    crate::log!(Topic::Init, Ok, "handing over to host main");
    let code = (hooks.host_main)(&mut sequencer);

    if let Err(err) = sequencer.process_exiting() {
        lifecycle::fatal(sequencer.phase(), err);
    }

    code
}
