use crate::{Error, ErrorOrigin};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// BootstrapPhase
///
/// Strictly ordered; the sequencer only ever moves to the next phase.
///

#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum BootstrapPhase {
    #[display("created")]
    Created,
    #[display("basic_startup_complete")]
    BasicStartupComplete,
    #[display("pre_sandbox_startup")]
    PreSandboxStartup,
    #[display("sandbox_initialized")]
    SandboxInitialized,
    #[display("run_process")]
    Running,
    #[display("process_exiting")]
    Exiting,
}

///
/// PhaseError
///

#[derive(Debug, ThisError)]
pub enum PhaseError {
    #[error("phase {to} cannot follow {from}")]
    OutOfOrder {
        from: BootstrapPhase,
        to: BootstrapPhase,
    },
}

impl From<PhaseError> for Error {
    fn from(err: PhaseError) -> Self {
        Self::invariant(ErrorOrigin::Lifecycle, err.to_string())
    }
}

impl BootstrapPhase {
    /// The only phase that may follow this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::BasicStartupComplete),
            Self::BasicStartupComplete => Some(Self::PreSandboxStartup),
            Self::PreSandboxStartup => Some(Self::SandboxInitialized),
            Self::SandboxInitialized => Some(Self::Running),
            Self::Running => Some(Self::Exiting),
            Self::Exiting => None,
        }
    }
}

/// Phases run in order, each exactly once: no skipping, repeating or
/// reversing.
pub fn check_transition(from: BootstrapPhase, to: BootstrapPhase) -> Result<(), PhaseError> {
    match from.next() {
        Some(next) if next == to => Ok(()),
        _ => Err(PhaseError::OutOfOrder { from, to }),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_sequential() {
        use BootstrapPhase::*;

        assert!(check_transition(Created, BasicStartupComplete).is_ok());
        assert!(check_transition(Running, Exiting).is_ok());
        assert!(check_transition(Created, PreSandboxStartup).is_err());
        assert!(check_transition(PreSandboxStartup, PreSandboxStartup).is_err());
        assert!(check_transition(Running, SandboxInitialized).is_err());

        let err: Error = check_transition(Exiting, Created).unwrap_err().into();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "phase created cannot follow process_exiting");
    }
}
