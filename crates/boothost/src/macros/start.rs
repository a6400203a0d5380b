// -----------------------------------------------------------------------------
// Start macro
// -----------------------------------------------------------------------------

/// Define the process `main` for a boothost host executable.
///
/// The macro embeds the configuration validated by [`macro@build`], parses
/// the process arguments and delegates everything else to [`crate::run`].
/// The crate root must define `boothost_collaborators`,
/// `boothost_dispatch_table` and `boothost_main`.
///
/// IMPORTANT:
/// - This macro must remain **thin**
/// - It must not encode policy
/// - It must not touch the environment or the disk itself
#[macro_export]
macro_rules! start {
    () => {
        fn main() {
            // Load embedded configuration early.
            let (config_str, config_path) = $crate::__boothost_load_config!();

            let code = $crate::run(
                config_str,
                config_path,
                $crate::core::model::ProcessInvocation::from_env(),
                $crate::HostHooks {
                    collaborators: boothost_collaborators,
                    dispatch_table: boothost_dispatch_table,
                    host_main: boothost_main,
                },
            );

            ::std::process::exit(code);
        }
    };
}

///
/// Load the embedded configuration.
///
/// This macro exists solely to embed the TOML configuration file at compile
/// time (`BOOTHOST_CONFIG_PATH`). It is used internally by [`macro@start`].

#[doc(hidden)]
#[macro_export]
macro_rules! __boothost_load_config {
    () => {{
        let config_path = env!("BOOTHOST_CONFIG_PATH");
        let config_str = include_str!(env!("BOOTHOST_CONFIG_PATH"));
        (config_str, config_path)
    }};
}
