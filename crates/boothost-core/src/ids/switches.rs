//!
//! Names of the invocation switches this layer reads or writes.
//!
//! Switch names are matched exactly (case-sensitive) and written without
//! their leading dashes.
//!

/// Role tag. Absent on the main process.
pub const PROCESS_TYPE: &str = "type";

/// Explicit user-data directory, absolute or relative to the app-data root.
pub const USER_DATA_DIR: &str = "user-data-dir";

pub const ENABLE_CRASH_REPORTER: &str = "enable-crash-reporter";
pub const DISABLE_CRASH_REPORTER: &str = "disable-breakpad";

/// White-label overrides of the product identity reported with crashes.
pub const PRODUCT_NAME: &str = "product-name";
pub const PRODUCT_VERSION: &str = "product-version";

/// Appended to every child role on Linux.
pub const DISABLE_SETUID_SANDBOX: &str = "disable-setuid-sandbox";

/// macOS only: the relauncher is installing from a mounted disk image.
pub const RELAUNCHER_DMG_DEVICE: &str = "dmg-device";

pub const ENABLE_LOGGING: &str = "enable-logging";
pub const LOG_FILE: &str = "log-file";
