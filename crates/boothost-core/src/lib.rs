//! Core bootstrap layer for multi-process hosts.
//!
//! Every process instance of a host executable passes through this crate
//! exactly once at startup and once at shutdown. It decides which role the
//! process plays, wires the role-appropriate collaborators, and either hands
//! control back to the host's normal main loop or runs a special-role entry
//! point in its place.
//!
//! Most users should depend on the `boothost` facade crate, which re-exports
//! this crate under `boothost::core` and provides the `build!` / `start!`
//! entrypoint macros.
//!
//! ## Layering
//!
//! - `ids/` role tags, switch names and path keys.
//! - `model/` the canonical invocation and product identity.
//! - `policy/` owns deterministic decision rules (consent, crash init,
//!   packaging, sandbox helpers).
//! - `ops/` side-effecting collaborators (environment, paths, logging
//!   initializer, OS hooks, profiling).
//! - `workflow/` user-data resolution, crash client, client factory.
//! - `dispatch` the special-role entry point table.
//! - `lifecycle/` the phase sequencer. The only module allowed to abort.
//!
//! The default flow is: lifecycle → workflow → policy → ops → model.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod log;
pub mod model;
pub mod ops;
pub mod platform;
pub mod policy;
pub mod workflow;

pub use ::boothost_utils as utils;
pub use error::{Error, ErrorClass, ErrorOrigin};

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// parse and validate a config string; used by the facade's build-time check
pub fn init_config(toml: &str) -> Result<config::BootstrapConfig, String> {
    config::BootstrapConfig::from_toml(toml).map_err(|err| err.to_string())
}
