//!
//! Process environment access.
//!
//! Bootstrap reads one directory-override variable and seeds the upstream
//! API variables. Both go through [`Environment`] so the reads and writes can
//! be observed in tests without touching the real process environment.
//!

use crate::{
    config::UpstreamApiConfig,
    log,
    log::Topic,
};
use std::{collections::BTreeMap, ffi::OsString};

///
/// Environment
///

pub trait Environment {
    fn var_os(&self, name: &str) -> Option<OsString>;

    fn set_var(&mut self, name: &str, value: &str);

    fn has_var(&self, name: &str) -> bool {
        self.var_os(name).is_some()
    }
}

///
/// ProcessEnvironment
///
/// The real process environment.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }

    fn set_var(&mut self, name: &str, value: &str) {
        // SAFETY: bootstrap runs on the process's only thread; no other thread
        // can be reading the environment concurrently.
        unsafe { std::env::set_var(name, value) }
    }
}

///
/// MemoryEnvironment
///
/// A detached environment, for embedding hosts that sanitize the inherited
/// environment and for tests.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryEnvironment {
    vars: BTreeMap<String, OsString>,
}

impl MemoryEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(|v| v.to_str())
    }
}

impl Environment for MemoryEnvironment {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.into());
    }
}

///
/// EnvOps
///

pub struct EnvOps;

impl EnvOps {
    /// Read a variable that must be valid UTF-8. Values that are not are
    /// logged and treated as unset.
    pub fn read_utf8(env: &dyn Environment, name: &str) -> Option<String> {
        match env.var_os(name)?.into_string() {
            Ok(value) => Some(value),
            Err(_) => {
                log!(Topic::Env, Warn, "ignoring {name}: value is not valid UTF-8");
                None
            }
        }
    }

    /// Set `name` only if the caller has not already set it. Returns whether
    /// the default was applied.
    pub fn set_default(env: &mut dyn Environment, name: &str, value: &str) -> bool {
        if env.has_var(name) {
            return false;
        }
        env.set_var(name, value);

        true
    }

    /// Seed the upstream API endpoint and key.
    pub fn apply_upstream_defaults(env: &mut dyn Environment, api: &UpstreamApiConfig) {
        for (name, value) in [
            (&api.endpoint_var, &api.endpoint),
            (&api.key_var, &api.key),
        ] {
            if Self::set_default(env, name, value) {
                log!(Topic::Env, Debug, "defaulted {name}");
            }
        }
    }
}

///
/// TESTS
///
