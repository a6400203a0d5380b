use boothost_core::{ids::PathKey, platform::Platform};
use boothost_testkit::TestHost;
use std::path::PathBuf;

const ENV_VAR: &str = "BOOTHOST_USER_DATA_DIR";

fn pre_sandbox(host: &TestHost) -> boothost_core::lifecycle::BootstrapSequencer {
    let mut seq = host.sequencer();
    seq.basic_startup_complete().unwrap();
    seq.pre_sandbox_startup().unwrap();
    seq
}

#[test]
fn relative_switch_is_absolute_under_app_data() {
    let host = TestHost::new(Platform::Linux).args(&["--user-data-dir=profiles/dev"]);
    let seq = pre_sandbox(&host);

    let dir = seq.user_data_dir().unwrap();
    assert!(dir.is_absolute());
    assert!(dir.starts_with(host.app_data()));
    assert_eq!(dir, host.app_data().join("profiles").join("dev"));
    assert!(dir.is_dir());
}

#[test]
fn absolute_switch_is_used_verbatim() {
    let host = TestHost::new(Platform::Windows);
    let wanted = host.app_data().join("elsewhere");
    let arg = format!("--user-data-dir={}", wanted.display());
    let host = host.args(&[arg]);
    let seq = pre_sandbox(&host);

    assert_eq!(seq.user_data_dir(), Some(wanted.as_path()));
}

#[test]
fn environment_beats_switch_and_is_inherited() {
    let host = TestHost::new(Platform::Linux);
    let from_env = host.app_data().join("from-env");
    let host = host
        .env(ENV_VAR, from_env.as_os_str())
        .args(&["--user-data-dir=/should/not/win"]);
    let seq = pre_sandbox(&host);

    assert_eq!(seq.user_data_dir(), Some(from_env.as_path()));
    assert_eq!(
        seq.invocation().switch_path("user-data-dir"),
        Some(from_env.clone())
    );

    // children launched from this invocation carry the directory explicitly
    let arg = format!("--user-data-dir={}", from_env.display());
    assert!(seq.invocation().argv().contains(&arg));
}

#[test]
fn trailing_separator_is_stripped() {
    let host = TestHost::new(Platform::Linux);
    let wanted = host.app_data().join("trail");
    let arg = format!("--user-data-dir={}/", wanted.display());
    let host = host.args(&[arg]);
    let seq = pre_sandbox(&host);

    let dir = seq.user_data_dir().unwrap();
    assert_eq!(dir, wanted);
    assert!(!dir.to_string_lossy().ends_with('/'));
}

#[test]
fn uncreatable_dir_does_not_stop_bootstrap() {
    let host = TestHost::new(Platform::Linux);
    std::fs::create_dir_all(host.app_data()).unwrap();
    let blocker = host.app_data().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();

    let wanted = blocker.join("profile");
    let arg = format!("--user-data-dir={}", wanted.display());
    let host = host.args(&[arg]);
    let mut seq = pre_sandbox(&host);

    assert_eq!(seq.user_data_dir(), Some(wanted.as_path()));
    assert!(!wanted.exists());
    assert_eq!(
        seq.path_overrides().get(PathKey::UserData),
        Some(host.default_user_data())
    );
    assert!(seq.sandbox_initialized().is_ok());
    assert_eq!(seq.run_process().unwrap(), None);
}

#[test]
fn posix_registers_native_messaging_dirs() {
    let host = TestHost::new(Platform::MacOs);
    let seq = pre_sandbox(&host);

    let user_nm = seq
        .path_overrides()
        .get(PathKey::UserNativeMessaging)
        .unwrap();
    assert_eq!(
        user_nm,
        host.app_data()
            .join("Google")
            .join("Chrome")
            .join("NativeMessagingHosts")
    );
    assert!(user_nm.is_dir());
    assert_eq!(
        seq.path_overrides().get(PathKey::NativeMessaging),
        Some(PathBuf::from("/Library/Google/Chrome/NativeMessagingHosts"))
    );
}

#[test]
fn windows_has_no_native_messaging_dirs() {
    let host = TestHost::new(Platform::Windows);
    let seq = pre_sandbox(&host);

    assert_eq!(seq.path_overrides().get(PathKey::UserNativeMessaging), None);
    assert_eq!(seq.path_overrides().get(PathKey::NativeMessaging), None);
    assert_eq!(
        seq.path_overrides().get(PathKey::HostUserData),
        Some(host.default_user_data())
    );
}

#[test]
fn repeated_bootstraps_agree() {
    let host = TestHost::new(Platform::Linux).args(&["--user-data-dir=same"]);

    let first = pre_sandbox(&host).user_data_dir().map(PathBuf::from);
    let second = pre_sandbox(&host).user_data_dir().map(PathBuf::from);

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn non_utf8_environment_is_ignored() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    let host = TestHost::new(Platform::Linux)
        .env(ENV_VAR, OsString::from_vec(vec![b'/', 0xff, b'x']));
    let seq = pre_sandbox(&host);

    assert_eq!(seq.user_data_dir(), Some(host.default_user_data().as_path()));
    assert!(!seq.invocation().has_switch("user-data-dir"));
}
