//!
//! Platform directories and the path-override registry.
//!

use crate::{
    Error, ErrorOrigin,
    ids::PathKey,
    log,
    log::Topic,
    platform::Platform,
};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// PathError
///

#[derive(Debug, ThisError)]
pub enum PathError {
    #[error("{key}: path '{path}' is not absolute")]
    NotAbsolute { key: PathKey, path: PathBuf },

    #[error("{key}: cannot create '{path}': {source}")]
    Create {
        key: PathKey,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Self::infra(ErrorOrigin::Paths, err.to_string())
    }
}

///
/// PathProvider
///
/// Source of the platform default directories.
///

pub trait PathProvider {
    /// Root that relative `--user-data-dir` values are resolved against.
    fn default_app_data_dir(&self) -> Option<PathBuf>;

    fn default_user_data_dir(&self) -> Option<PathBuf>;
}

///
/// DirsPathProvider
///
/// Platform defaults from the `dirs` crate: the local app-data directory on
/// Windows and the config directory elsewhere, with the vendor directory as
/// the user-data leaf.
///

#[derive(Clone, Debug)]
pub struct DirsPathProvider {
    platform: Platform,
    vendor_dir: String,
}

impl DirsPathProvider {
    #[must_use]
    pub fn new(platform: Platform, vendor_dir: impl Into<String>) -> Self {
        Self {
            platform,
            vendor_dir: vendor_dir.into(),
        }
    }
}

impl PathProvider for DirsPathProvider {
    fn default_app_data_dir(&self) -> Option<PathBuf> {
        match self.platform {
            Platform::Windows => dirs::data_local_dir(),
            Platform::Linux | Platform::MacOs => dirs::config_dir(),
        }
    }

    fn default_user_data_dir(&self) -> Option<PathBuf> {
        self.default_app_data_dir()
            .map(|root| root.join(&self.vendor_dir))
    }
}

///
/// StaticPathProvider
///
/// Fixed roots, for portable installs and tests.
///

#[derive(Clone, Debug)]
pub struct StaticPathProvider {
    app_data: PathBuf,
    vendor_dir: String,
}

impl StaticPathProvider {
    #[must_use]
    pub fn new(app_data: impl Into<PathBuf>, vendor_dir: impl Into<String>) -> Self {
        Self {
            app_data: app_data.into(),
            vendor_dir: vendor_dir.into(),
        }
    }
}

impl PathProvider for StaticPathProvider {
    fn default_app_data_dir(&self) -> Option<PathBuf> {
        Some(self.app_data.clone())
    }

    fn default_user_data_dir(&self) -> Option<PathBuf> {
        Some(self.app_data.join(&self.vendor_dir))
    }
}

///
/// PathOverrides
///
/// Registry of resolved directories, keyed by [`PathKey`].
///

pub trait PathOverrides {
    /// Register `path` under `key`, creating the directory tree first when
    /// `create_if_needed` is set. On failure nothing is registered.
    fn override_and_create(
        &mut self,
        key: PathKey,
        path: &Path,
        create_if_needed: bool,
    ) -> Result<(), PathError>;

    fn get(&self, key: PathKey) -> Option<PathBuf>;
}

///
/// PathTable
///

#[derive(Clone, Debug, Default)]
pub struct PathTable {
    paths: BTreeMap<PathKey, PathBuf>,
}

impl PathTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PathKey, &Path)> {
        self.paths.iter().map(|(k, p)| (*k, p.as_path()))
    }
}

impl PathOverrides for PathTable {
    fn override_and_create(
        &mut self,
        key: PathKey,
        path: &Path,
        create_if_needed: bool,
    ) -> Result<(), PathError> {
        if !path.is_absolute() {
            return Err(PathError::NotAbsolute {
                key,
                path: path.to_path_buf(),
            });
        }

        if create_if_needed && !path.is_dir() {
            fs::create_dir_all(path).map_err(|source| PathError::Create {
                key,
                path: path.to_path_buf(),
                source,
            })?;
            log!(Topic::Paths, Debug, "{key}: created {}", path.display());
        }

        self.paths.insert(key, path.to_path_buf());

        Ok(())
    }

    fn get(&self, key: PathKey) -> Option<PathBuf> {
        self.paths.get(&key).cloned()
    }
}

///
/// TESTS
///
