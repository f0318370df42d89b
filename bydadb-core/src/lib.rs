//! The core, UI-agnostic library for the `bydadb` assistant.
//!
//! `bydadb-core` is used by both front ends, the interactive console
//! (`bydadb`) and the small graphical window (`bydadb-gui`). It handles
//! address validation, the recent-address file, copying APKs onto a USB drive
//! and installing APKs on a head unit through a local ADB server.
//!
//! The library is structured into several key modules:
//! - [`address`]: Syntactic validation of head-unit addresses.
//! - [`store`]: The `.ips.dat` list of recently used addresses.
//! - [`mod@copy`]: Copying APK files into a USB drive.
//! - [`mod@install`]: The connect-then-install sequence.
//! - [`bridge`]: The [`Bridge`] trait and its ADB-backed implementation.
//! - [`platform`]: Discovery of mounted removable drives.
//! - [`cancel`]: The [`CancelToken`] honored between blocking steps.
//!
//! The primary entry points are [`copy::run`] and [`install::run`]. Both are
//! blocking and report their progress via callbacks, so the calling
//! application can display progress any way it chooses.
//!
//! ## Example: Installing APKs with Progress Reporting
//!
//! ```rust,no_run
//! use bydadb_core::{CancelToken, Config, install};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), bydadb_core::Error> {
//!     let config = Config::default();
//!     let mut bridge = config.bridge();
//!     let store = config.recent_addresses();
//!     let packages = vec![PathBuf::from("APKs/maps.apk")];
//!
//!     // Give up waiting after three minutes.
//!     let cancel = CancelToken::with_timeout(config.install_timeout);
//!
//!     let summary = install::run(
//!         &mut bridge,
//!         &store,
//!         "192.168.1.100",
//!         &packages,
//!         &cancel,
//!         |event| println!("{}", event.describe()),
//!     )?;
//!
//!     println!("Installed {} APKs.", summary.count());
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod bridge;
pub mod cancel;
pub mod config;
pub mod copy;
pub mod drive;
mod error;
pub mod install;
pub mod platform;
pub mod store;

pub use address::{DeviceAddress, is_valid_address};
pub use bridge::{AdbBridge, Bridge};
pub use cancel::CancelToken;
pub use config::Config;
pub use drive::UsbDrive;
pub use error::{Error, ErrorKind, Result};
pub use store::RecentAddresses;
