//! Shared fixtures for the workspace integration tests.
//!
//! Entry points are plain `fn` pointers, so the ones used in tests report
//! through process-wide counters keyed by role.

use boothost_core::dispatch::MainFunctionParams;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const RELAUNCHER_EXIT: i32 = 42;
pub const PRINT_SERVICE_EXIT: i32 = 3;

static RELAUNCHER_RUNS: AtomicUsize = AtomicUsize::new(0);
static PRINT_SERVICE_RUNS: AtomicUsize = AtomicUsize::new(0);

pub fn relauncher_entry(_: &MainFunctionParams<'_>) -> i32 {
    RELAUNCHER_RUNS.fetch_add(1, Ordering::SeqCst);
    RELAUNCHER_EXIT
}

pub fn print_service_entry(_: &MainFunctionParams<'_>) -> i32 {
    PRINT_SERVICE_RUNS.fetch_add(1, Ordering::SeqCst);
    PRINT_SERVICE_EXIT
}

/// Entry point for tables that must never match.
pub fn forbidden_entry(params: &MainFunctionParams<'_>) -> i32 {
    panic!("entry point ran for role '{}'", params.role)
}

#[must_use]
pub fn relauncher_runs() -> usize {
    RELAUNCHER_RUNS.load(Ordering::SeqCst)
}

#[must_use]
pub fn print_service_runs() -> usize {
    PRINT_SERVICE_RUNS.load(Ordering::SeqCst)
}
