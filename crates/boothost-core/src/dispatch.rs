//!
//! Special-role dispatch.
//!
//! A handful of roles replace normal startup entirely with a small auxiliary
//! program sharing the executable. The table is scanned in order by exact
//! role match; the first hit runs and its return value becomes the process
//! exit code. No hit means the host continues its normal per-role startup.
//!

use crate::{ids::ProcessRole, log, log::Topic, model::ProcessInvocation, platform::Platform};

///
/// MainFunctionParams
///

#[derive(Clone, Copy, Debug)]
pub struct MainFunctionParams<'a> {
    pub invocation: &'a ProcessInvocation,
    pub role: &'a ProcessRole,
}

pub type EntryPoint = fn(&MainFunctionParams<'_>) -> i32;

///
/// MainFunction
///

#[derive(Clone, Debug)]
pub struct MainFunction {
    pub name: ProcessRole,
    pub entry: EntryPoint,
}

///
/// SpecialEntryPoints
///
/// Host-supplied special-role programs for [`DispatchTable::standard`].
///

#[derive(Clone, Copy, Debug)]
pub struct SpecialEntryPoints {
    pub relauncher: EntryPoint,
    pub print_service: Option<EntryPoint>,
}

///
/// DispatchTable
///

#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    entries: Vec<MainFunction>,
}

impl DispatchTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: ProcessRole, entry: EntryPoint) -> Self {
        self.entries.push(MainFunction { name, entry });
        self
    }

    /// The table every host ships: print-service (when built with print
    /// preview and supplied) then the relauncher.
    #[must_use]
    pub fn standard(platform: Platform, entries: SpecialEntryPoints) -> Self {
        let mut table = Self::new();

        let print_service = entries
            .print_service
            .filter(|_| cfg!(feature = "print-preview"));
        if let Some(print_service) = print_service {
            table = table.with(ProcessRole::PRINT_SERVICE, print_service);
        }

        table.with(relauncher_role(platform), entries.relauncher)
    }

    /// Run the first entry whose name matches `role` exactly.
    #[must_use]
    pub fn dispatch(&self, role: &ProcessRole, params: &MainFunctionParams<'_>) -> Option<i32> {
        let entry = self.entries.iter().find(|e| e.name == *role)?;

        log!(Topic::Dispatch, Info, "running {} entry point", role.label());
        let code = (entry.entry)(params);
        log!(Topic::Dispatch, Info, "{} exited with {code}", role.label());

        Some(code)
    }

    pub fn names(&self) -> impl Iterator<Item = &ProcessRole> {
        self.entries.iter().map(|e| &e.name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Role tag of the relauncher. macOS hosts launch it from the app bundle
/// and everything else from the executable directly; the tag is the same.
#[must_use]
pub const fn relauncher_role(platform: Platform) -> ProcessRole {
    match platform {
        Platform::MacOs | Platform::Linux | Platform::Windows => ProcessRole::RELAUNCHER,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn seven(_: &MainFunctionParams<'_>) -> i32 {
        7
    }

    fn echo_args(params: &MainFunctionParams<'_>) -> i32 {
        i32::try_from(params.invocation.args().len()).unwrap_or(i32::MAX)
    }

    fn unreachable_entry(_: &MainFunctionParams<'_>) -> i32 {
        panic!("must not run")
    }

    #[test]
    fn exact_match_returns_exit_code() {
        let table = DispatchTable::new().with(ProcessRole::RELAUNCHER, seven);
        let inv = ProcessInvocation::from_args(["host", "--type=relauncher"]);
        let role = ProcessRole::from_invocation(&inv);
        let params = MainFunctionParams {
            invocation: &inv,
            role: &role,
        };

        assert_eq!(table.dispatch(&role, &params), Some(7));
    }

    #[test]
    fn no_match_runs_nothing() {
        let table = DispatchTable::new()
            .with(ProcessRole::RELAUNCHER, unreachable_entry)
            .with(ProcessRole::PRINT_SERVICE, unreachable_entry);
        let inv = ProcessInvocation::from_args(["host"]);

        for role in [
            ProcessRole::MAIN,
            ProcessRole::RENDERER,
            ProcessRole::new("Relauncher"),
            ProcessRole::new("relauncher "),
        ] {
            let params = MainFunctionParams {
                invocation: &inv,
                role: &role,
            };
            assert_eq!(table.dispatch(&role, &params), None);
        }
    }

    #[test]
    fn first_match_wins() {
        let table = DispatchTable::new()
            .with(ProcessRole::RELAUNCHER, echo_args)
            .with(ProcessRole::RELAUNCHER, unreachable_entry);
        let inv = ProcessInvocation::from_args(["host", "--type=relauncher", "a", "b"]);
        let role = ProcessRole::RELAUNCHER;
        let params = MainFunctionParams {
            invocation: &inv,
            role: &role,
        };

        assert_eq!(table.dispatch(&role, &params), Some(2));
    }

    #[test]
    fn standard_table_layout() {
        let table = DispatchTable::standard(
            Platform::Linux,
            SpecialEntryPoints {
                relauncher: seven,
                print_service: Some(seven),
            },
        );
        let names: Vec<_> = table.names().map(ProcessRole::as_str).collect();

        #[cfg(feature = "print-preview")]
        assert_eq!(names, ["service", "relauncher"]);
        #[cfg(not(feature = "print-preview"))]
        assert_eq!(names, ["relauncher"]);
    }
}
