//! Contains the logic for installing APKs on a head unit over ADB.
//!
//! The sequence is strictly ordered and stops at the first failure:
//! 1.  Validate the address and check that every package file exists.
//! 2.  Remember the address in the recent-address store.
//! 3.  Ask the ADB server to connect to the head unit.
//! 4.  Install each package in the order given.
use crate::address::DeviceAddress;
use crate::bridge::Bridge;
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::store::RecentAddresses;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Progress notifications emitted while an install runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallEvent {
    AddressSaved(DeviceAddress),
    Connecting(DeviceAddress),
    Connected(DeviceAddress),
    Installing {
        index: usize,
        total: usize,
        package: PathBuf,
    },
    Installed {
        index: usize,
        total: usize,
        package: PathBuf,
    },
}

impl InstallEvent {
    /// A one-line description suitable for a status label.
    pub fn describe(&self) -> String {
        match self {
            InstallEvent::AddressSaved(addr) => format!("Saved {addr} to recent addresses."),
            InstallEvent::Connecting(addr) => format!("Connecting to {addr}..."),
            InstallEvent::Connected(addr) => format!("Successfully connected to {addr}."),
            InstallEvent::Installing { package, .. } => {
                format!("Installing {}...", display_name(package))
            }
            InstallEvent::Installed { package, .. } => {
                format!("Installed {}.", display_name(package))
            }
        }
    }
}

/// Packages that were installed by a successful run, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub address: Option<DeviceAddress>,
    pub installed: Vec<PathBuf>,
}

impl InstallSummary {
    pub fn count(&self) -> usize {
        self.installed.len()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Checks the inputs of an install without touching the network.
///
/// Returns the parsed address. Fails with a validation error for a malformed
/// address or an empty package list, and with [`Error::PackageMissing`] for
/// the first path that is not an existing file.
pub fn preflight<P: AsRef<Path>>(address: &str, packages: &[P]) -> Result<DeviceAddress> {
    let address = DeviceAddress::parse(address)?;
    if packages.is_empty() {
        return Err(Error::NoPackages);
    }
    for package in packages {
        let package = package.as_ref();
        if !package.is_file() {
            return Err(Error::PackageMissing(package.to_path_buf()));
        }
    }
    Ok(address)
}

/// Installs `packages` on the head unit at `address`.
///
/// # Arguments
///
/// * `bridge` - The ADB connection to use.
/// * `store` - Where the address is remembered once the inputs check out.
/// * `address` - The head unit's address, as typed or picked by the user.
/// * `packages` - APK files to install, in order.
/// * `cancel` - Checked before connecting and before each package. A token
///   with a deadline turns an overlong run into [`Error::Timeout`].
/// * `on_event` - Called as the run progresses.
///
/// # Errors
///
/// - Validation and missing-file errors from [`preflight`], before anything
///   else happens.
/// - [`Error::Store`] if the address cannot be saved.
/// - [`Error::Bridge`] if connecting or any install fails. Later packages
///   are not attempted.
/// - [`Error::Timeout`] or [`Error::Cancelled`] from the token.
pub fn run<B, P, F>(
    bridge: &mut B,
    store: &RecentAddresses,
    address: &str,
    packages: &[P],
    cancel: &CancelToken,
    mut on_event: F,
) -> Result<InstallSummary>
where
    B: Bridge + ?Sized,
    P: AsRef<Path>,
    F: FnMut(&InstallEvent),
{
    let address = preflight(address, packages)?;

    store.save(address.as_str())?;
    on_event(&InstallEvent::AddressSaved(address.clone()));

    cancel.check()?;
    on_event(&InstallEvent::Connecting(address.clone()));
    bridge.connect(&address).inspect_err(|e| {
        warn!(%address, error = %e, "connect failed");
    })?;
    on_event(&InstallEvent::Connected(address.clone()));

    let total = packages.len();
    let mut summary = InstallSummary {
        address: Some(address.clone()),
        installed: Vec::with_capacity(total),
    };

    for (index, package) in packages.iter().enumerate() {
        let package = package.as_ref();
        cancel.check()?;

        on_event(&InstallEvent::Installing {
            index,
            total,
            package: package.to_path_buf(),
        });
        bridge.install(package).inspect_err(|e| {
            warn!(package = %package.display(), error = %e, "install failed");
        })?;
        debug!(package = %package.display(), "installed");

        on_event(&InstallEvent::Installed {
            index,
            total,
            package: package.to_path_buf(),
        });
        summary.installed.push(package.to_path_buf());
    }

    info!(%address, count = summary.count(), "install finished");
    Ok(summary)
}
