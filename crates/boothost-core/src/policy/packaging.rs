//!
//! Packaging invariants.
//!
//! macOS ships a main app bundle and a background-only helper bundle. The
//! main bundle only ever runs the main role; the helper only ever runs child
//! roles. A mismatch means the build was packaged wrongly and privileged
//! logic would run under the wrong identity.
//!

use crate::{
    Error, ErrorOrigin,
    ids::switches,
    model::ProcessInvocation,
    platform::Platform,
};
use std::path::Path;

/// Whether `exe` lives inside a helper bundle (`<Product> Helper*.app`).
#[must_use]
pub fn is_helper_bundle(exe: &Path) -> bool {
    exe.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| name.contains(" Helper") && name.ends_with(".app"))
    })
}

///
/// check_role_packaging
///
/// The helper requires a non-empty `--type`; the main bundle forbids the
/// switch entirely. Other platforms have a single executable.
///

pub fn check_role_packaging(
    platform: Platform,
    background_only: bool,
    invocation: &ProcessInvocation,
) -> Result<(), Error> {
    if platform != Platform::MacOs {
        return Ok(());
    }

    let role_value = invocation.switch_value(switches::PROCESS_TYPE);

    if background_only {
        if role_value.is_none_or(str::is_empty) {
            return Err(Error::invariant(
                ErrorOrigin::Lifecycle,
                "helper application requires --type",
            ));
        }
    } else if let Some(value) = role_value {
        return Err(Error::invariant(
            ErrorOrigin::Lifecycle,
            format!("main application forbids --type, saw '{value}'"),
        ));
    }

    Ok(())
}

///
/// TESTS
///
