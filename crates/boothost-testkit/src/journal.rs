use boothost_core::{ops::logging::FileRetention, workflow::client::ClientKind};
use derive_more::Display;
use std::{
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

///
/// Event
///
/// One observable collaborator call.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Event {
    #[display("crash client registered ({product} {version})")]
    CrashClientRegistered { product: String, version: String },

    #[display("crash initialized for '{role}' (initial={initial_client})")]
    CrashInitialized { role: String, initial_client: bool },

    #[display("crash keys set ({} switches)", switches.len())]
    CrashKeysSet { switches: Vec<String> },

    #[display("logging init ({retention:?})")]
    LoggingInit {
        retention: FileRetention,
        user_data: Option<PathBuf>,
    },

    #[display("logging cleanup")]
    LoggingCleanup,

    #[display("profiler started")]
    ProfilerStarted,

    #[display("profiler restarted after fork")]
    ProfilerRestarted,

    #[display("hook {_0}")]
    Hook(String),

    #[display("content client created")]
    ContentClientCreated,

    #[display("{_0} client created")]
    ClientCreated(ClientKind),

    #[display("utility pre-sandbox startup")]
    UtilityPreSandbox,
}

///
/// Journal
///
/// Shared, ordered record of every call the recording doubles receive.
/// Clones append to the same record.
///

#[derive(Clone, Debug, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, event: Event) {
        self.lock().push(event);
    }

    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    #[must_use]
    pub fn contains(&self, event: &Event) -> bool {
        self.lock().contains(event)
    }

    #[must_use]
    pub fn count(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.lock().iter().filter(|e| matches(e)).count()
    }

    /// Index of the first event satisfying `matches`.
    #[must_use]
    pub fn position(&self, matches: impl Fn(&Event) -> bool) -> Option<usize> {
        self.lock().iter().position(matches)
    }

    #[must_use]
    pub fn hooks(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                Event::Hook(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
