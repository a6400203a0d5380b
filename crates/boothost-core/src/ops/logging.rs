//!
//! Logging initializer.
//!
//! Console logging is always on. File logging starts only when the
//! invocation carries `--enable-logging`; the file is `--log-file` or
//! `debug.log` inside the user-data directory.
//!

use crate::{
    Error, ErrorOrigin,
    ids::{ProcessRole, switches},
    log,
    log::Topic,
    model::ProcessInvocation,
};
use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

pub const DEFAULT_LOG_FILE: &str = "debug.log";

///
/// FileRetention
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileRetention {
    /// Truncate any previous log. Used by the main process, which starts a
    /// fresh log for the whole process tree.
    DeleteOld,
    /// Append to the log the main process created.
    AppendToOld,
}

impl FileRetention {
    #[must_use]
    pub fn for_role(role: &ProcessRole) -> Self {
        if role.is_main() {
            Self::DeleteOld
        } else {
            Self::AppendToOld
        }
    }
}

///
/// LoggingError
///

#[derive(Debug, ThisError)]
pub enum LoggingError {
    #[error("no log file location: user-data directory unresolved and no --log-file")]
    NoLocation,

    #[error("cannot open log file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<LoggingError> for Error {
    fn from(err: LoggingError) -> Self {
        Self::infra(ErrorOrigin::Logging, err.to_string())
    }
}

///
/// LoggingInit
///

pub trait LoggingInit {
    fn init(
        &mut self,
        invocation: &ProcessInvocation,
        retention: FileRetention,
        user_data_dir: Option<&Path>,
    ) -> Result<(), LoggingError>;

    /// Flush and release everything `init` set up.
    fn cleanup(&mut self);
}

///
/// FileLogging
///

#[derive(Debug, Default)]
pub struct FileLogging {
    path: Option<PathBuf>,
}

impl FileLogging {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The file currently being written, if file logging started.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn log_file_path(
        invocation: &ProcessInvocation,
        user_data_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        invocation
            .switch_path(switches::LOG_FILE)
            .or_else(|| user_data_dir.map(|dir| dir.join(DEFAULT_LOG_FILE)))
    }

    fn open(path: &Path, retention: FileRetention) -> Result<File, LoggingError> {
        let mut options = OpenOptions::new();
        match retention {
            FileRetention::DeleteOld => options.write(true).create(true).truncate(true),
            FileRetention::AppendToOld => options.append(true).create(true),
        };

        options.open(path).map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl LoggingInit for FileLogging {
    fn init(
        &mut self,
        invocation: &ProcessInvocation,
        retention: FileRetention,
        user_data_dir: Option<&Path>,
    ) -> Result<(), LoggingError> {
        if !invocation.has_switch(switches::ENABLE_LOGGING) {
            return Ok(());
        }

        let path =
            Self::log_file_path(invocation, user_data_dir).ok_or(LoggingError::NoLocation)?;
        let file = Self::open(&path, retention)?;

        log::attach_file(file);
        log!(Topic::Init, Info, "logging to {} ({retention:?})", path.display());
        self.path = Some(path);

        Ok(())
    }

    fn cleanup(&mut self) {
        if self.path.take().is_some() {
            log::detach_file();
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_follows_role() {
        assert_eq!(
            FileRetention::for_role(&ProcessRole::MAIN),
            FileRetention::DeleteOld
        );
        assert_eq!(
            FileRetention::for_role(&ProcessRole::RENDERER),
            FileRetention::AppendToOld
        );
    }

    #[test]
    fn log_file_switch_wins_over_user_data() {
        let inv = ProcessInvocation::from_args(["host", "--log-file=/var/log/host.log"]);
        assert_eq!(
            FileLogging::log_file_path(&inv, Some(Path::new("/data"))),
            Some(PathBuf::from("/var/log/host.log"))
        );

        let inv = ProcessInvocation::from_args(["host"]);
        assert_eq!(
            FileLogging::log_file_path(&inv, Some(Path::new("/data"))),
            Some(Path::new("/data").join(DEFAULT_LOG_FILE))
        );
        assert_eq!(FileLogging::log_file_path(&inv, None), None);
    }

    #[test]
    fn disabled_without_switch() {
        let mut logging = FileLogging::new();
        let inv = ProcessInvocation::from_args(["host"]);
        logging
            .init(&inv, FileRetention::DeleteOld, Some(Path::new("/nonexistent")))
            .unwrap();

        assert!(logging.path().is_none());
    }

    #[test]
    fn delete_old_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("debug.log");
        std::fs::write(&path, "stale line\n").unwrap();

        let file = FileLogging::open(&path, FileRetention::DeleteOld).unwrap();
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        std::fs::write(&path, "kept\n").unwrap();
        let file = FileLogging::open(&path, FileRetention::AppendToOld).unwrap();
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
    }
}
