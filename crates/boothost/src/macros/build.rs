//! Build-script helpers that embed and validate `boothost.toml`.

/// Embed the bootstrap configuration into a host crate's build script.
///
/// Reads the provided TOML file (relative to the crate manifest), validates
/// it with [`BootstrapConfig`](crate::core::config::BootstrapConfig) and sets
/// `BOOTHOST_CONFIG_PATH` for the `include_str!` in [`macro@start`]. An
/// invalid file fails the build.
#[macro_export]
macro_rules! build {
    ($file:expr) => {{
        let manifest_dir = ::std::path::PathBuf::from(
            ::std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"),
        );
        let cfg_path = manifest_dir.join($file);

        // check config file exists (fails the build early if invalid)
        let cfg_str = ::std::fs::read_to_string(&cfg_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", cfg_path.display(), e));

        if let Err(err) = $crate::core::init_config(&cfg_str) {
            panic!("Invalid boothost config {}: {}", cfg_path.display(), err);
        }

        // Export an ABSOLUTE path for include_str!
        let abs = cfg_path
            .canonicalize()
            .expect("canonicalize boothost config path");
        println!("cargo:rustc-env=BOOTHOST_CONFIG_PATH={}", abs.display());
        println!("cargo:rerun-if-changed={}", abs.display());
    }};
}
