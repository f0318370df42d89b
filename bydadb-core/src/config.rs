//! Settings shared by both front ends.
use crate::bridge::{ADB_SERVER_PORT, AdbBridge, DEFAULT_DEVICE_PORT};
use crate::store::{DEFAULT_FILE, RecentAddresses};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

/// Folder the "copy to USB" action takes APKs from, relative to the working
/// directory.
pub const DEFAULT_APK_DIR: &str = "APKs";

/// Wall-clock limit for a graphical install run.
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Source folder for the copy-to-USB action.
    pub apk_dir: PathBuf,
    /// File holding the recently used head-unit addresses.
    pub recent_file: PathBuf,
    /// Address of the local ADB server.
    pub adb_server: SocketAddrV4,
    /// Port ADB listens on at the head unit.
    pub device_port: u16,
    /// Deadline applied to install runs that use one.
    pub install_timeout: Duration,
}

impl Config {
    pub fn recent_addresses(&self) -> RecentAddresses {
        RecentAddresses::open(&self.recent_file)
    }

    pub fn bridge(&self) -> AdbBridge {
        AdbBridge::new(self.adb_server, self.device_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apk_dir: PathBuf::from(DEFAULT_APK_DIR),
            recent_file: PathBuf::from(DEFAULT_FILE),
            adb_server: SocketAddrV4::new(Ipv4Addr::LOCALHOST, ADB_SERVER_PORT),
            device_port: DEFAULT_DEVICE_PORT,
            install_timeout: INSTALL_TIMEOUT,
        }
    }
}
