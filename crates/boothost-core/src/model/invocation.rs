//!
//! The canonical process invocation.
//!
//! Parsing is total: every argument list produces an invocation. A switch is
//! an argument starting with `--` (or a single `-`) followed by a name and an
//! optional `=value`. A bare `--` ends switch parsing; everything after it is
//! a positional argument. Later duplicates of a switch overwrite earlier
//! ones. Arguments that are not valid UTF-8 are converted lossily.
//!

use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

const SWITCH_TERMINATOR: &str = "--";

///
/// ProcessInvocation
///
/// One instance exists per process. It is built once from the process
/// arguments and owned by the bootstrap sequencer; the only mutations are the
/// switches bootstrap itself appends for child processes to inherit.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcessInvocation {
    program: PathBuf,
    switches: BTreeMap<String, String>,
    switch_order: Vec<String>,
    args: Vec<String>,
}

impl ProcessInvocation {
    /// Parse the current process's arguments.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_os_args(std::env::args_os())
    }

    /// Parse OS-level arguments; the first entry is the program.
    pub fn from_os_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::from_args(
            args.into_iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    /// Parse textual arguments; the first entry is the program.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut iter = args.into_iter();
        let mut invocation = Self {
            program: iter
                .next()
                .map(|p| PathBuf::from(p.as_ref()))
                .unwrap_or_default(),
            ..Self::default()
        };

        let mut switches_done = false;
        for arg in iter {
            let arg = arg.as_ref();

            if switches_done {
                invocation.args.push(arg.to_string());
                continue;
            }

            if arg == SWITCH_TERMINATOR {
                switches_done = true;
                continue;
            }

            match parse_switch(arg) {
                Some((name, value)) => invocation.set_switch(name, value),
                None => invocation.args.push(arg.to_string()),
            }
        }

        invocation
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn has_switch(&self, name: &str) -> bool {
        self.switches.contains_key(name)
    }

    /// Value of a switch; `Some("")` for a switch given without a value.
    #[must_use]
    pub fn switch_value(&self, name: &str) -> Option<&str> {
        self.switches.get(name).map(String::as_str)
    }

    /// Value of a switch as a path; `None` when absent or empty.
    #[must_use]
    pub fn switch_path(&self, name: &str) -> Option<PathBuf> {
        self.switch_value(name)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Positional (non-switch) arguments, in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Switches in name order.
    pub fn switches(&self) -> impl Iterator<Item = (&str, &str)> {
        self.switches
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn append_switch(&mut self, name: &str) {
        self.set_switch(name, "");
    }

    pub fn append_switch_value(&mut self, name: &str, value: &str) {
        self.set_switch(name, value);
    }

    pub fn append_switch_path(&mut self, name: &str, path: &Path) {
        self.set_switch(name, &path.to_string_lossy());
    }

    /// Rebuild an argument vector equivalent to this invocation, in the form
    /// a child process would be launched with.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + self.switch_order.len() + self.args.len());
        argv.push(self.program.to_string_lossy().into_owned());

        for name in &self.switch_order {
            match self.switches.get(name).map(String::as_str) {
                Some("") | None => argv.push(format!("--{name}")),
                Some(value) => argv.push(format!("--{name}={value}")),
            }
        }

        if self.args.iter().any(|arg| arg.starts_with('-')) {
            argv.push(SWITCH_TERMINATOR.to_string());
        }
        argv.extend(self.args.iter().cloned());

        argv
    }

    fn set_switch(&mut self, name: &str, value: &str) {
        if self
            .switches
            .insert(name.to_string(), value.to_string())
            .is_none()
        {
            self.switch_order.push(name.to_string());
        }
    }
}

// split "--name=value" / "-name" into its parts; None for positional args
fn parse_switch(arg: &str) -> Option<(&str, &str)> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;

    let (name, value) = body.split_once('=').unwrap_or((body, ""));
    if name.is_empty() {
        return None;
    }

    Some((name, value))
}

///
/// TESTS
///
