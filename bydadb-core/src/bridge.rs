//! The seam between the installer and the Android Debug Bridge.
//!
//! [`AdbBridge`] talks to a running ADB server through the `adb_client`
//! crate. The wire protocol is entirely the library's business; this module
//! only turns its results into [`crate::Error`] values.
use crate::address::DeviceAddress;
use crate::error::Result;
use adb_client::{ADBDeviceExt, ADBServer};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;
use tracing::debug;

/// Port of the local ADB server.
pub const ADB_SERVER_PORT: u16 = 5037;

/// Port ADB listens on for network connections on the head unit.
pub const DEFAULT_DEVICE_PORT: u16 = 5555;

/// The two requests the installer needs from ADB.
pub trait Bridge {
    /// Asks the ADB server to connect to the head unit at `address`.
    fn connect(&mut self, address: &DeviceAddress) -> Result<()>;

    /// Installs `package` on the device connected by the last
    /// [`connect`](Self::connect) call.
    fn install(&mut self, package: &Path) -> Result<()>;
}

/// [`Bridge`] backed by a local ADB server.
pub struct AdbBridge {
    server: ADBServer,
    device_port: u16,
    serial: Option<String>,
}

impl AdbBridge {
    /// Prepares a client for the ADB server at `server`. No connection is
    /// opened until the first request.
    pub fn new(server: SocketAddrV4, device_port: u16) -> Self {
        Self {
            server: ADBServer::new(server),
            device_port,
            serial: None,
        }
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new(
            SocketAddrV4::new(Ipv4Addr::LOCALHOST, ADB_SERVER_PORT),
            DEFAULT_DEVICE_PORT,
        )
    }
}

impl Bridge for AdbBridge {
    fn connect(&mut self, address: &DeviceAddress) -> Result<()> {
        let target = address.socket_addr(self.device_port)?;
        debug!(%target, "asking ADB server to connect");
        self.server.connect_device(target)?;
        self.serial = Some(target.to_string());
        Ok(())
    }

    fn install(&mut self, package: &Path) -> Result<()> {
        let mut device = match &self.serial {
            Some(serial) => self.server.get_device_by_name(serial)?,
            None => self.server.get_device()?,
        };
        debug!(package = %package.display(), "installing package");
        device.install(&package)?;
        Ok(())
    }
}
