use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bydadb_core::install::{self, InstallEvent};
use bydadb_core::{Bridge, CancelToken, DeviceAddress, Error, ErrorKind, RecentAddresses, Result};
use tempfile::{TempDir, tempdir};

/// A bridge that records every request and fails on demand.
#[derive(Default)]
struct ScriptedBridge {
    calls: Vec<String>,
    refuse_connect: bool,
    fail_install_at: Option<usize>,
    installs: usize,
    /// Cancelled from inside `install`, to simulate a deadline or Ctrl+C
    /// arriving while a package is being pushed.
    cancel_during_install: Option<CancelToken>,
}

impl Bridge for ScriptedBridge {
    fn connect(&mut self, address: &DeviceAddress) -> Result<()> {
        self.calls.push(format!("connect {address}"));
        if self.refuse_connect {
            return Err(Error::Bridge(format!("failed to connect to {address}:5555")));
        }
        Ok(())
    }

    fn install(&mut self, package: &Path) -> Result<()> {
        let name = package.file_name().unwrap().to_string_lossy().into_owned();
        self.calls.push(format!("install {name}"));
        let index = self.installs;
        self.installs += 1;
        if let Some(token) = &self.cancel_during_install {
            token.cancel();
        }
        if self.fail_install_at == Some(index) {
            return Err(Error::Bridge(
                "INSTALL_FAILED_UPDATE_INCOMPATIBLE".to_string(),
            ));
        }
        Ok(())
    }
}

struct Fixture {
    dir: TempDir,
    store: RecentAddresses,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().expect("tempdir");
        let store = RecentAddresses::open(dir.path().join(".ips.dat"));
        Self { dir, store }
    }

    fn apks(&self, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = self.dir.path().join(name);
                fs::write(&path, b"PK").expect("write apk");
                path
            })
            .collect()
    }
}

#[test]
fn installs_every_package_in_order() {
    let fx = Fixture::new();
    let apks = fx.apks(&["maps.apk", "music.apk"]);
    let mut bridge = ScriptedBridge::default();
    let mut events = Vec::new();

    let summary = install::run(
        &mut bridge,
        &fx.store,
        "192.168.1.100",
        &apks,
        &CancelToken::new(),
        |e| events.push(e.clone()),
    )
    .expect("install");

    assert_eq!(
        bridge.calls,
        vec![
            "connect 192.168.1.100",
            "install maps.apk",
            "install music.apk"
        ]
    );
    assert_eq!(summary.installed, apks);
    assert_eq!(fx.store.load().unwrap(), vec!["192.168.1.100"]);

    let addr = DeviceAddress::parse("192.168.1.100").unwrap();
    assert_eq!(events[0], InstallEvent::AddressSaved(addr.clone()));
    assert_eq!(events[1], InstallEvent::Connecting(addr.clone()));
    assert_eq!(events[2], InstallEvent::Connected(addr));
    assert_eq!(events.len(), 7);
    assert_eq!(events[3].describe(), "Installing maps.apk...");
}

#[test]
fn protocol_error_stops_remaining_packages() {
    let fx = Fixture::new();
    let apks = fx.apks(&["one.apk", "two.apk", "three.apk"]);
    let mut bridge = ScriptedBridge {
        fail_install_at: Some(1),
        ..Default::default()
    };

    let err = install::run(
        &mut bridge,
        &fx.store,
        "10.0.0.5",
        &apks,
        &CancelToken::new(),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert!(err.to_string().contains("INSTALL_FAILED_UPDATE_INCOMPATIBLE"));
    assert_eq!(
        bridge.calls,
        vec!["connect 10.0.0.5", "install one.apk", "install two.apk"]
    );
}

#[test]
fn refused_connection_installs_nothing_but_keeps_the_address() {
    let fx = Fixture::new();
    let apks = fx.apks(&["one.apk"]);
    let mut bridge = ScriptedBridge {
        refuse_connect: true,
        ..Default::default()
    };

    let err = install::run(
        &mut bridge,
        &fx.store,
        "10.0.0.5",
        &apks,
        &CancelToken::new(),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(bridge.calls, vec!["connect 10.0.0.5"]);
    assert_eq!(fx.store.load().unwrap(), vec!["10.0.0.5"]);
}

#[test]
fn malformed_address_touches_nothing() {
    let fx = Fixture::new();
    let apks = fx.apks(&["one.apk"]);
    let mut bridge = ScriptedBridge::default();

    let err = install::run(
        &mut bridge,
        &fx.store,
        "my-car",
        &apks,
        &CancelToken::new(),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(bridge.calls.is_empty());
    assert!(!fx.store.path().exists());
}

#[test]
fn missing_package_aborts_before_saving_or_connecting() {
    let fx = Fixture::new();
    let mut apks = fx.apks(&["one.apk"]);
    apks.push(fx.dir.path().join("ghost.apk"));
    let mut bridge = ScriptedBridge::default();

    let err = install::run(
        &mut bridge,
        &fx.store,
        "10.0.0.5",
        &apks,
        &CancelToken::new(),
        |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, Error::PackageMissing(ref p) if p.ends_with("ghost.apk")));
    assert_eq!(err.kind(), ErrorKind::Environment);
    assert!(bridge.calls.is_empty());
    assert!(fx.store.load().unwrap().is_empty());
}

#[test]
fn empty_selection_is_rejected() {
    let fx = Fixture::new();
    let mut bridge = ScriptedBridge::default();
    let none: Vec<PathBuf> = Vec::new();

    let err = install::run(
        &mut bridge,
        &fx.store,
        "10.0.0.5",
        &none,
        &CancelToken::new(),
        |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, Error::NoPackages));
}

#[test]
fn expired_deadline_is_a_timeout_not_a_protocol_error() {
    let fx = Fixture::new();
    let apks = fx.apks(&["one.apk"]);
    let mut bridge = ScriptedBridge::default();

    let err = install::run(
        &mut bridge,
        &fx.store,
        "10.0.0.5",
        &apks,
        &CancelToken::with_timeout(Duration::ZERO),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(bridge.calls.is_empty());
}

#[test]
fn cancellation_during_an_install_skips_the_rest() {
    let fx = Fixture::new();
    let apks = fx.apks(&["one.apk", "two.apk"]);
    let token = CancelToken::new();
    let mut bridge = ScriptedBridge {
        cancel_during_install: Some(token.clone()),
        ..Default::default()
    };

    let err = install::run(&mut bridge, &fx.store, "10.0.0.5", &apks, &token, |_| {})
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(bridge.calls, vec!["connect 10.0.0.5", "install one.apk"]);
}

#[test]
fn out_of_range_address_is_accepted_and_remembered() {
    let fx = Fixture::new();
    let apks = fx.apks(&["one.apk"]);
    let mut bridge = ScriptedBridge::default();

    install::run(
        &mut bridge,
        &fx.store,
        "999.999.999.999",
        &apks,
        &CancelToken::new(),
        |_| {},
    )
    .expect("scripted bridge does not dial");

    assert_eq!(fx.store.load().unwrap(), vec!["999.999.999.999"]);
}
