//!
//! Bootstrap logging.
//!
//! Every line goes to stderr. Once the logging initializer attaches a file
//! (see `ops::logging`), lines are also appended there with a timestamp.
//! The role column is set as soon as the sequencer identifies the role.
//!

use crate::utils::{format::fit_column, time::timestamp};
use derive_more::Display;
use std::{
    fs::File,
    io::Write,
    sync::{Mutex, MutexGuard, PoisonError},
};

static ROLE_LABEL: Mutex<Option<String>> = Mutex::new(None);
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

const ROLE_COLUMN: usize = 9;

///
/// Level
///

#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

///
/// Topic
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Topic {
    Client,
    Config,
    Crash,
    Dispatch,
    Env,
    Fork,
    Hooks,
    Init,
    Paths,
    Sandbox,
    Shutdown,
}

#[macro_export]
macro_rules! log {
    // =========================================
    // (1) With topic (normal + trailing comma)
    // =========================================
    ($topic:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner Some(&$topic.to_string()), $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // (2) No topic (normal + trailing comma)
    // =========================================
    ($level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner None::<&str>, $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // INTERNAL
    // =========================================
    (@inner $topic:expr, $level:expr, $fmt:expr $(, $arg:expr)*) => {{
        let topic_opt: Option<&str> = $topic;
        let message = format!($fmt $(, $arg)*);

        $crate::log::__emit(topic_opt, $level, &message);
    }};
}

///
/// Helpers
///

// a panicking logger must not take the rest of bootstrap down with it
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set the role shown in the role column of every subsequent line.
pub fn set_role_label(label: &str) {
    *lock(&ROLE_LABEL) = Some(label.to_string());
}

/// Start mirroring log lines into `file`. Replaces any previous file.
pub fn attach_file(file: File) {
    *lock(&LOG_FILE) = Some(file);
}

/// Stop mirroring into the log file and hand it back, flushed.
pub fn detach_file() -> Option<File> {
    let mut file = lock(&LOG_FILE).take()?;
    let _ = file.flush();

    Some(file)
}

#[must_use]
pub fn has_file() -> bool {
    lock(&LOG_FILE).is_some()
}

/// Flush the attached log file, if any.
pub fn flush() {
    if let Some(file) = lock(&LOG_FILE).as_mut() {
        let _ = file.flush();
    }
}

/// Render the console form of a line (without trailing newline).
#[must_use]
pub fn format_line(role: &str, topic: Option<&str>, level: Level, message: &str) -> String {
    let role_col = fit_column(role, ROLE_COLUMN);

    let final_msg = match topic {
        Some(t) => format!("[{t}] {message}"),
        None => message.to_string(),
    };

    let (color, reset) = match level {
        Level::Ok => ("\x1b[32m", "\x1b[0m"),
        Level::Info => ("\x1b[34m", "\x1b[0m"),
        Level::Warn => ("\x1b[33m", "\x1b[0m"),
        Level::Error => ("\x1b[31m", "\x1b[0m"),
        Level::Debug => ("", ""),
    };

    let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());

    format!("{label}|{role_col}| {final_msg}")
}

#[doc(hidden)]
pub fn __emit(topic: Option<&str>, level: Level, message: &str) {
    let role = lock(&ROLE_LABEL)
        .clone()
        .unwrap_or_else(|| "...".to_string());

    eprintln!("{}", format_line(&role, topic, level, message));

    if let Some(file) = lock(&LOG_FILE).as_mut() {
        let topic = topic.map(|t| format!("[{t}] ")).unwrap_or_default();
        let _ = writeln!(
            file,
            "[{}:{}:{}] {topic}{message}",
            timestamp(),
            role,
            level.to_string().to_uppercase()
        );
    }
}

///
/// TESTS
///
