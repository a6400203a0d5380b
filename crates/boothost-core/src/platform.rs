//!
//! Target platform families.
//!
//! Every platform-conditional decision in this crate takes a [`Platform`]
//! value instead of reading `cfg!` directly, so all branches run in tests on
//! any host. Only the leaf OS calls in `ops::hooks` are compiled per target.
//!

use derive_more::Display;

///
/// Platform
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Platform {
    #[display("linux")]
    Linux,
    #[display("macos")]
    MacOs,
    #[display("windows")]
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for. Other unix targets are
    /// treated as Linux: they share its crash, sandbox and path behavior.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    #[must_use]
    pub const fn is_posix(self) -> bool {
        matches!(self, Self::Linux | Self::MacOs)
    }

    /// Platforms whose crash consent comes from a persisted consent store
    /// rather than from invocation switches.
    #[must_use]
    pub const fn uses_consent_store(self) -> bool {
        matches!(self, Self::MacOs | Self::Windows)
    }

    /// Logging on Windows cannot start before the sandbox is in place.
    #[must_use]
    pub const fn logs_before_sandbox(self) -> bool {
        !matches!(self, Self::Windows)
    }
}

///
/// BuildTarget
///
/// Compile-time facts that feed the Windows handle-hook decision.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildTarget {
    pub debug_assertions: bool,
    pub pointer_width_64: bool,
}

impl BuildTarget {
    #[must_use]
    pub const fn current() -> Self {
        Self {
            debug_assertions: cfg!(debug_assertions),
            pointer_width_64: cfg!(target_pointer_width = "64"),
        }
    }

    /// Handle-verification hooks only run in 32-bit debug builds; every other
    /// build disables the verifier instead.
    #[must_use]
    pub const fn use_handle_hooks(self) -> bool {
        self.debug_assertions && !self.pointer_width_64
    }
}

///
/// TESTS
///
