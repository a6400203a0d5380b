//! Bootstrap lifecycle.
//!
//! The sequencer drives a process through the startup phases exactly once
//! (and a reduced re-initialization once per fork). This is the only module
//! allowed to abort the process.

mod phase;
mod sequencer;

pub use phase::{BootstrapPhase, PhaseError, check_transition};
pub use sequencer::{BootstrapSequencer, Collaborators};

use crate::{log, log::Topic};
use std::fmt;

/// Terminate on an invariant violation. Logs, flushes the log file and
/// aborts without unwinding; nothing past this point can be trusted to run
/// under the right identity.
pub fn fatal(phase: BootstrapPhase, err: impl fmt::Display) -> ! {
    log!(Topic::Init, Error, "{phase}: {err}");
    log::flush();

    std::process::abort()
}
