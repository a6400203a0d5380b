//!
//! Crash-adjacent OS hooks.
//!
//! Every hook is best-effort. Callers log failures and carry on; nothing in
//! this module may abort startup.
//!

use crate::{Error, ErrorOrigin, policy::packaging};
#[cfg(unix)]
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error as ThisError;

///
/// HookError
///

#[derive(Debug, ThisError)]
pub enum HookError {
    /// The hook has no implementation on this platform or build.
    #[error("{0}: not available on this platform")]
    Unavailable(&'static str),

    #[error("{hook}: os error {code}")]
    Os { hook: &'static str, code: i32 },
}

impl HookError {
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<HookError> for Error {
    fn from(err: HookError) -> Self {
        Self::infra(ErrorOrigin::Hooks, err.to_string())
    }
}

///
/// OsHooks
///

pub trait OsHooks {
    /// Fail file access on unavailable volumes instead of showing a dialog.
    fn suppress_error_dialogs(&mut self) -> Result<(), HookError>;

    fn install_handle_hooks(&mut self) -> Result<(), HookError>;

    fn disable_handle_verifier(&mut self) -> Result<(), HookError>;

    /// Ignore CRT invalid-parameter errors instead of terminating.
    fn ignore_invalid_parameters(&mut self) -> Result<(), HookError>;

    /// Keep `treadmill` deallocated objects around to catch use-after-free.
    fn enable_zombies(&mut self, treadmill: usize) -> Result<(), HookError>;

    /// On SIGTERM run `on_terminate`, then restore the default disposition
    /// and re-raise the signal.
    fn install_termination_handler(&mut self, on_terminate: fn()) -> Result<(), HookError>;

    /// Whether this executable is the background-only helper bundle.
    fn is_background_only_process(&self) -> bool;
}

///
/// NativeOsHooks
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NativeOsHooks;

impl NativeOsHooks {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OsHooks for NativeOsHooks {
    fn suppress_error_dialogs(&mut self) -> Result<(), HookError> {
        #[cfg(windows)]
        {
            use windows_sys::Win32::System::Diagnostics::Debug::{
                SEM_FAILCRITICALERRORS, SEM_NOOPENFILEERRORBOX, SetErrorMode,
            };

            let new_flags = SEM_FAILCRITICALERRORS | SEM_NOOPENFILEERRORBOX;
            // SAFETY: SetErrorMode only swaps the process error-mode flags.
            // The second call preserves whatever mode was already set.
            unsafe {
                let existing = SetErrorMode(new_flags);
                SetErrorMode(existing | new_flags);
            }

            Ok(())
        }

        #[cfg(not(windows))]
        {
            Err(HookError::Unavailable("error dialogs"))
        }
    }

    fn install_handle_hooks(&mut self) -> Result<(), HookError> {
        Err(HookError::Unavailable("handle hooks"))
    }

    fn disable_handle_verifier(&mut self) -> Result<(), HookError> {
        Err(HookError::Unavailable("handle verifier"))
    }

    fn ignore_invalid_parameters(&mut self) -> Result<(), HookError> {
        Err(HookError::Unavailable("invalid parameter handler"))
    }

    fn enable_zombies(&mut self, _treadmill: usize) -> Result<(), HookError> {
        Err(HookError::Unavailable("zombies"))
    }

    fn install_termination_handler(&mut self, on_terminate: fn()) -> Result<(), HookError> {
        #[cfg(unix)]
        {
            install_sigterm_handler(on_terminate)
        }

        #[cfg(not(unix))]
        {
            let _ = on_terminate;
            Err(HookError::Unavailable("termination handler"))
        }
    }

    fn is_background_only_process(&self) -> bool {
        std::env::current_exe()
            .map(|exe| packaging::is_helper_bundle(&exe))
            .unwrap_or(false)
    }
}

// fn pointer run by the SIGTERM handler; 0 means none
#[cfg(unix)]
static ON_TERMINATE: AtomicUsize = AtomicUsize::new(0);

#[cfg(unix)]
extern "C" fn terminate_handler(signal: libc::c_int) {
    let hook = ON_TERMINATE.load(Ordering::Acquire);
    if hook != 0 {
        // SAFETY: ON_TERMINATE only ever holds a value produced from a `fn()`.
        let hook = unsafe { std::mem::transmute::<usize, fn()>(hook) };
        hook();
    }

    // SAFETY: sigaction and raise are async-signal-safe; the zeroed struct
    // is a valid "default disposition, empty mask" action.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = libc::SIG_DFL;
        libc::sigemptyset(&raw mut action.sa_mask);
        libc::sigaction(signal, &raw const action, std::ptr::null_mut());
        libc::raise(signal);
    }
}

#[cfg(unix)]
fn install_sigterm_handler(on_terminate: fn()) -> Result<(), HookError> {
    ON_TERMINATE.store(on_terminate as usize, Ordering::Release);

    // SAFETY: the action is fully initialized before it is installed and the
    // handler only calls async-signal-safe functions besides the hook.
    let rc = unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = terminate_handler as extern "C" fn(libc::c_int) as libc::sighandler_t;
        action.sa_flags = libc::SA_RESETHAND;
        libc::sigemptyset(&raw mut action.sa_mask);
        libc::sigaction(libc::SIGTERM, &raw const action, std::ptr::null_mut())
    };

    if rc == 0 {
        Ok(())
    } else {
        Err(HookError::Os {
            hook: "sigterm handler",
            code: std::io::Error::last_os_error().raw_os_error().unwrap_or(-1),
        })
    }
}

///
/// TESTS
///
