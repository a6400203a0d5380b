use boothost_core::{
    dispatch::DispatchTable,
    ids::{PathKey, ProcessRole},
    lifecycle::{BootstrapPhase, BootstrapSequencer},
    ops::logging::FileRetention,
    platform::{BuildTarget, Platform},
    workflow::client::ClientKind,
};
use boothost_testkit::{Event, TestHost};
use boothost_tests::{RELAUNCHER_EXIT, forbidden_entry, relauncher_entry, relauncher_runs};
use std::ffi::OsStr;

fn full_run(host: &TestHost) -> (BootstrapSequencer, Option<i32>) {
    let mut seq = host.sequencer();
    let code = seq.run();
    (seq, code)
}

#[test]
fn main_process_without_switches() {
    let host = TestHost::new(Platform::Linux)
        .dispatch(DispatchTable::new().with(ProcessRole::RELAUNCHER, forbidden_entry));
    let (mut seq, code) = full_run(&host);

    assert_eq!(code, None);
    assert!(seq.role().is_main());
    assert_eq!(seq.phase(), BootstrapPhase::Running);

    let user_data = host.default_user_data();
    assert_eq!(seq.user_data_dir(), Some(user_data.as_path()));
    assert!(user_data.is_dir());
    assert_eq!(
        seq.path_overrides().get(PathKey::ComponentUser),
        Some(user_data.join("Extensions"))
    );
    assert!(user_data.join("Extensions").is_dir());

    // linux default: on unless disabled
    assert!(seq.crash_client().unwrap().collect_stats_consent());

    seq.process_exiting().unwrap();

    assert_eq!(
        host.journal().events(),
        vec![
            Event::ProfilerStarted,
            Event::ContentClientCreated,
            Event::CrashClientRegistered {
                product: "Boothost".into(),
                version: boothost_core::VERSION.into(),
            },
            Event::LoggingInit {
                retention: FileRetention::DeleteOld,
                user_data: Some(user_data),
            },
            Event::CrashKeysSet { switches: vec![] },
            Event::LoggingCleanup,
        ]
    );
}

#[test]
fn relauncher_exit_code_replaces_startup() {
    let host = TestHost::new(Platform::MacOs)
        .background_only(true)
        .args(&["--type=relauncher", "--", "/Applications/Acme.app"])
        .dispatch(
            DispatchTable::new()
                .with(ProcessRole::PRINT_SERVICE, forbidden_entry)
                .with(ProcessRole::RELAUNCHER, relauncher_entry),
        );

    let before = relauncher_runs();
    let (mut seq, code) = full_run(&host);

    assert_eq!(code, Some(RELAUNCHER_EXIT));
    assert_eq!(relauncher_runs(), before + 1);

    // no role client was ever created for the host main loop
    assert!(seq.client_factory().current().is_none());
    assert_eq!(
        host.journal()
            .count(|e| matches!(e, Event::ClientCreated(_))),
        0
    );
}

#[test]
fn linux_child_gets_setuid_sandbox_disabled() {
    let host = TestHost::new(Platform::Linux).args(&["--type=renderer", "--enable-crash-reporter"]);
    let (seq, _) = full_run(&host);

    assert!(seq.invocation().has_switch("disable-setuid-sandbox"));
    assert!(host.journal().contains(&Event::CrashInitialized {
        role: "renderer".into(),
        initial_client: false,
    }));

    // crash keys are taken after the switch is injected
    assert!(host.journal().contains(&Event::CrashKeysSet {
        switches: vec![
            "disable-setuid-sandbox".into(),
            "enable-crash-reporter".into(),
            "type".into(),
        ],
    }));
    assert!(host.journal().contains(&Event::LoggingInit {
        retention: FileRetention::AppendToOld,
        user_data: Some(host.default_user_data()),
    }));
}

#[test]
fn main_process_keeps_setuid_sandbox() {
    let host = TestHost::new(Platform::Linux);
    let (seq, _) = full_run(&host);

    assert!(!seq.invocation().has_switch("disable-setuid-sandbox"));
}

#[test]
fn zygote_defers_crash_init_and_runs_utility_hook() {
    let host = TestHost::new(Platform::Linux).args(&["--type=zygote", "--enable-crash-reporter"]);
    let (_, code) = full_run(&host);

    assert_eq!(code, None);
    assert_eq!(
        host.journal()
            .count(|e| matches!(e, Event::CrashInitialized { .. })),
        0
    );
    assert!(host.journal().contains(&Event::UtilityPreSandbox));
}

#[test]
fn windows_logs_after_sandbox() {
    let host = TestHost::new(Platform::Windows).args(&["--enable-crash-reporter"]);
    let mut seq = host.sequencer();

    seq.basic_startup_complete().unwrap();
    seq.pre_sandbox_startup().unwrap();
    assert_eq!(
        host.journal()
            .count(|e| matches!(e, Event::LoggingInit { .. })),
        0
    );
    assert!(host.journal().contains(&Event::CrashInitialized {
        role: String::new(),
        initial_client: true,
    }));

    seq.sandbox_initialized().unwrap();
    let log_at = host
        .journal()
        .position(|e| matches!(e, Event::LoggingInit { .. }))
        .unwrap();
    let dialogs_at = host
        .journal()
        .position(|e| *e == Event::Hook("error_dialogs".into()))
        .unwrap();
    assert!(log_at < dialogs_at);

    // 64-bit release build: verifier off, no handle hooks
    assert_eq!(
        host.journal().hooks(),
        ["handle_verifier", "invalid_parameters", "error_dialogs"]
    );
}

#[test]
fn windows_32bit_debug_installs_handle_hooks() {
    let host = TestHost::new(Platform::Windows).build_target(BuildTarget {
        debug_assertions: true,
        pointer_width_64: false,
    });
    let mut seq = host.sequencer();
    seq.basic_startup_complete().unwrap();

    assert_eq!(host.journal().hooks(), ["handle_hooks", "invalid_parameters"]);
}

#[test]
fn mac_zombie_treadmill_depends_on_role() {
    let main = TestHost::new(Platform::MacOs);
    main.sequencer().basic_startup_complete().unwrap();
    assert_eq!(main.journal().hooks(), ["zombies:10000"]);

    let child = TestHost::new(Platform::MacOs).args(&["--type=renderer"]);
    child.sequencer().basic_startup_complete().unwrap();
    assert_eq!(child.journal().hooks(), ["zombies:1000"]);
}

#[test]
fn hook_failures_are_not_fatal() {
    let host = TestHost::new(Platform::Windows).failing_hooks().failing_logging();
    let (mut seq, code) = full_run(&host);

    assert_eq!(code, None);
    assert_eq!(seq.phase(), BootstrapPhase::Running);
    assert!(seq.process_exiting().is_ok());
}

#[test]
fn mac_helper_without_role_is_fatal() {
    let host = TestHost::new(Platform::MacOs).background_only(true);
    let mut seq = host.sequencer();
    seq.basic_startup_complete().unwrap();

    let err = seq.pre_sandbox_startup().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("requires --type"));
}

#[test]
fn mac_main_bundle_with_role_is_fatal() {
    let host = TestHost::new(Platform::MacOs).args(&["--type=renderer"]);
    let mut seq = host.sequencer();
    seq.basic_startup_complete().unwrap();

    let err = seq.pre_sandbox_startup().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("saw 'renderer'"));
}

#[test]
fn mac_dmg_relauncher_is_initial_crash_client() {
    let host = TestHost::new(Platform::MacOs)
        .background_only(true)
        .args(&["--type=relauncher", "--dmg-device=/dev/disk4"]);
    let mut seq = host.sequencer();
    seq.basic_startup_complete().unwrap();
    seq.pre_sandbox_startup().unwrap();

    assert!(host.journal().contains(&Event::CrashInitialized {
        role: "relauncher".into(),
        initial_client: true,
    }));
}

#[test]
fn phases_cannot_repeat_or_skip() {
    let host = TestHost::new(Platform::Linux);
    let mut seq = host.sequencer();

    assert!(seq.pre_sandbox_startup().unwrap_err().is_fatal());
    seq.basic_startup_complete().unwrap();
    assert!(seq.basic_startup_complete().unwrap_err().is_fatal());
    seq.pre_sandbox_startup().unwrap();

    // crash client registered exactly once
    assert_eq!(
        host.journal()
            .count(|e| matches!(e, Event::CrashClientRegistered { .. })),
        1
    );
}

#[test]
fn upstream_defaults_never_overwrite() {
    let host = TestHost::new(Platform::Linux).env("UPSTREAM_API_KEY", "caller-key");
    let (seq, _) = full_run(&host);

    let env = seq.environment();
    assert_eq!(
        env.var_os("UPSTREAM_API_KEY").as_deref(),
        Some(OsStr::new("caller-key"))
    );
    assert_eq!(
        env.var_os("UPSTREAM_API_ENDPOINT").as_deref(),
        Some(OsStr::new("https://www.googleapis.com/"))
    );
}

#[test]
fn role_client_is_created_once() {
    let host = TestHost::new(Platform::Linux).args(&["--type=renderer"]);
    let (mut seq, _) = full_run(&host);

    assert_eq!(seq.role_client().kind(), ClientKind::Renderer);
    assert_eq!(seq.role_client().kind(), ClientKind::Renderer);
    assert_eq!(
        host.journal()
            .count(|e| matches!(e, Event::ClientCreated(_))),
        1
    );
    assert_eq!(seq.content_client().map(|c| c.name()), Some("stub-content"));
}

#[test]
fn product_identity_overrides_reach_crash_backend() {
    let host = TestHost::new(Platform::Linux)
        .args(&["--product-name=Acme Browser", "--product-version=9.1"]);
    let (seq, _) = full_run(&host);

    assert!(host.journal().contains(&Event::CrashClientRegistered {
        product: "Acme Browser".into(),
        version: "9.1".into(),
    }));
    assert_eq!(seq.crash_client().unwrap().product_identity().version, "9.1");
}
