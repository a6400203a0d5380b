//!
//! Profiling counters.
//!

///
/// Profiler
///
/// Process-wide profiling state. Counters are tied to the OS-level process
/// identity, so a process created by duplication must restart them.
///

pub trait Profiler {
    /// Reset per-process counters; called once per process start and once
    /// per duplication event.
    fn process_started(&self);

    fn being_profiled(&self) -> bool;

    fn restart_after_fork(&self);

    /// Stops profiling and flushes its output. Must be safe to call from a
    /// signal handler.
    fn shutdown_hook(&self) -> fn();
}

///
/// NoopProfiler
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProfiler;

fn noop_shutdown() {}

impl Profiler for NoopProfiler {
    fn process_started(&self) {}

    fn being_profiled(&self) -> bool {
        false
    }

    fn restart_after_fork(&self) {}

    fn shutdown_hook(&self) -> fn() {
        noop_shutdown
    }
}
