//!
//! User-data directory resolution.
//!
//! Precedence, first match wins:
//! 1. the override environment variable (valid UTF-8 only), which is also
//!    written back onto the invocation so child processes inherit it as a
//!    switch instead of re-reading the environment;
//! 2. the `--user-data-dir` switch, relative values resolved against the
//!    platform app-data root (never the working directory);
//! 3. the platform default user-data directory.
//!
//! The result is stripped of trailing separators and created on disk. A
//! failure to create it is logged and resolution carries on with the
//! computed path: persistence degrades, bootstrap does not stop.
//!

use crate::{
    config::BootstrapConfig,
    ids::{PathKey, switches},
    log,
    log::Topic,
    model::ProcessInvocation,
    ops::{
        env::{EnvOps, Environment},
        paths::{PathOverrides, PathProvider},
    },
    platform::Platform,
};
use std::path::{Path, PathBuf};

pub const COMPONENT_DIR: &str = "Extensions";
pub const NATIVE_MESSAGING_DIR: &str = "NativeMessagingHosts";

///
/// UserDataSource
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserDataSource {
    Environment,
    Switch,
    PlatformDefault,
    Unresolved,
}

///
/// UserDataDirectory
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserDataDirectory {
    pub path: PathBuf,
    pub source: UserDataSource,
}

impl UserDataDirectory {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }
}

///
/// UserDataLocator
///
/// Resolves once per process; later calls return the cached directory
/// without touching the environment, the invocation or the disk.
///

#[derive(Debug)]
pub struct UserDataLocator {
    platform: Platform,
    env_var: String,
    native_vendor_path: PathBuf,
    native_system_dir: PathBuf,
    resolved: Option<UserDataDirectory>,
}

impl UserDataLocator {
    #[must_use]
    pub fn new(platform: Platform, config: &BootstrapConfig) -> Self {
        let nm = &config.native_messaging;
        let native_system_dir = match platform {
            Platform::MacOs => PathBuf::from(&nm.system_dir_macos),
            Platform::Linux | Platform::Windows => PathBuf::from(&nm.system_dir_linux),
        };

        Self {
            platform,
            env_var: config.user_data_env.clone(),
            native_vendor_path: PathBuf::from(&nm.vendor_path),
            native_system_dir,
            resolved: None,
        }
    }

    /// The cached result, if `resolve` has run.
    #[must_use]
    pub const fn resolved(&self) -> Option<&UserDataDirectory> {
        self.resolved.as_ref()
    }

    pub fn resolve(
        &mut self,
        invocation: &mut ProcessInvocation,
        env: &dyn Environment,
        paths: &dyn PathProvider,
        overrides: &mut dyn PathOverrides,
    ) -> &UserDataDirectory {
        if self.resolved.is_none() {
            let dir = self.resolve_uncached(invocation, env, paths, overrides);
            self.resolved = Some(dir);
        }

        self.resolved.get_or_insert_with(|| UserDataDirectory {
            path: PathBuf::new(),
            source: UserDataSource::Unresolved,
        })
    }

    fn resolve_uncached(
        &self,
        invocation: &mut ProcessInvocation,
        env: &dyn Environment,
        paths: &dyn PathProvider,
        overrides: &mut dyn PathOverrides,
    ) -> UserDataDirectory {
        let mut source = UserDataSource::PlatformDefault;

        // 1. environment
        if let Some(value) = EnvOps::read_utf8(env, &self.env_var).filter(|v| !v.is_empty()) {
            invocation.append_switch_path(switches::USER_DATA_DIR, Path::new(&value));
            source = UserDataSource::Environment;
        }

        // 2. switch (which now also carries the environment value)
        let mut computed = invocation
            .switch_path(switches::USER_DATA_DIR)
            .and_then(|dir| absolutize(dir, paths))
            .unwrap_or_default();
        if source != UserDataSource::Environment && !computed.as_os_str().is_empty() {
            source = UserDataSource::Switch;
        }

        computed = strip_trailing_separators(&computed);

        if !computed.as_os_str().is_empty() {
            if let Err(err) = overrides.override_and_create(PathKey::UserData, &computed, true) {
                log!(Topic::Paths, Warn, "user data dir: {err}");
            }
        }

        // 3. platform default
        let path = match overrides.get(PathKey::UserData) {
            Some(path) => path,
            None => {
                let fallback = paths
                    .default_user_data_dir()
                    .map(|dir| strip_trailing_separators(&dir));

                if let Some(fallback) = &fallback {
                    if let Err(err) =
                        overrides.override_and_create(PathKey::UserData, fallback, true)
                    {
                        log!(Topic::Paths, Warn, "default user data dir: {err}");
                    }
                }

                // continue with whatever was computed, even if it can't be created
                match (computed.as_os_str().is_empty(), fallback) {
                    (false, _) => computed,
                    (true, Some(fallback)) => {
                        source = UserDataSource::PlatformDefault;
                        fallback
                    }
                    (true, None) => {
                        source = UserDataSource::Unresolved;
                        PathBuf::new()
                    }
                }
            }
        };

        if !path.as_os_str().is_empty() {
            if let Err(err) = overrides.override_and_create(PathKey::HostUserData, &path, false) {
                log!(Topic::Paths, Warn, "host user data dir: {err}");
            }
        }

        if self.platform.is_posix() {
            self.register_native_messaging(paths, overrides);
        }

        log!(
            Topic::Paths,
            Info,
            "user data dir: {} ({source:?})",
            path.display()
        );

        UserDataDirectory { path, source }
    }

    // Native messaging hosts are looked up where the related vendor
    // application installs them: the vendor path replaces the last component
    // of the default user-data directory.
    fn register_native_messaging(
        &self,
        paths: &dyn PathProvider,
        overrides: &mut dyn PathOverrides,
    ) {
        if let Some(user_dir) = paths
            .default_user_data_dir()
            .and_then(|dir| native_messaging_user_dir(&dir, &self.native_vendor_path))
        {
            if let Err(err) =
                overrides.override_and_create(PathKey::UserNativeMessaging, &user_dir, true)
            {
                log!(Topic::Paths, Warn, "native messaging dir: {err}");
            }
        }

        if let Err(err) =
            overrides.override_and_create(PathKey::NativeMessaging, &self.native_system_dir, false)
        {
            log!(Topic::Paths, Warn, "system native messaging dir: {err}");
        }
    }
}

/// Relative paths are resolved against the platform app-data root, never
/// the working directory. With no root available the value is dropped.
fn absolutize(dir: PathBuf, paths: &dyn PathProvider) -> Option<PathBuf> {
    if dir.is_absolute() {
        return Some(dir);
    }

    let root = paths.default_app_data_dir().filter(|root| root.is_absolute());
    if root.is_none() {
        log!(
            Topic::Paths,
            Warn,
            "ignoring relative user data dir '{}': no app data root",
            dir.display()
        );
    }

    root.map(|root| root.join(dir))
}

/// Remove trailing separators (keeping a bare root intact).
#[must_use]
pub fn strip_trailing_separators(path: &Path) -> PathBuf {
    path.components().collect()
}

/// `<parent of default user-data>/<vendor path>/NativeMessagingHosts`.
#[must_use]
pub fn native_messaging_user_dir(default_user_data: &Path, vendor_path: &Path) -> Option<PathBuf> {
    let parent = default_user_data.parent()?;

    Some(parent.join(vendor_path).join(NATIVE_MESSAGING_DIR))
}

/// `<user-data>/Extensions`.
#[must_use]
pub fn component_dir(user_data: &Path) -> PathBuf {
    user_data.join(COMPONENT_DIR)
}

///
/// TESTS
///
