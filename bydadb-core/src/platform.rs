//! Discovery of mounted removable drives.
//!
//! The operating system specifics are left to `sysinfo`, which reads the
//! removable flag from `/sys/block` on Linux and the drive type on Windows
//! and macOS. This module only decides which disks are worth offering as a
//! copy destination.
use crate::drive::UsbDrive;
use std::path::{Path, PathBuf};
use sysinfo::Disks;
use tracing::debug;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// What the filter needs to know about one disk.
struct DiskInfo {
    name: String,
    mount_point: PathBuf,
    removable: bool,
    total_bytes: u64,
    available_bytes: u64,
}

/// Keeps removable, mounted, non-empty disks, excluding the root file system.
/// A device node (`/dev/...`) mounted in several places is listed once, at
/// its first mount point. Elsewhere the name is a volume label, which two
/// sticks may share, so those are never merged.
fn select_drives(disks: impl IntoIterator<Item = DiskInfo>) -> Vec<UsbDrive> {
    let mut drives: Vec<UsbDrive> = Vec::new();
    for disk in disks {
        if !disk.removable
            || disk.total_bytes == 0
            || disk.mount_point.as_os_str().is_empty()
            || disk.mount_point == Path::new("/")
        {
            continue;
        }
        if disk.name.starts_with("/dev/") && drives.iter().any(|d| d.name == disk.name) {
            continue;
        }
        drives.push(UsbDrive {
            mount_point: disk.mount_point,
            name: disk.name,
            size_gb: disk.total_bytes as f64 / BYTES_PER_GB,
            free_gb: disk.available_bytes as f64 / BYTES_PER_GB,
        });
    }
    drives.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    drives
}

/// Scans for mounted removable drives (USB sticks, SD cards).
///
/// An empty list is not an error: callers fall back to asking for a path.
pub fn get_removable_drives() -> Vec<UsbDrive> {
    let disks = Disks::new_with_refreshed_list();
    let drives = select_drives(disks.iter().map(|disk| DiskInfo {
        name: disk.name().to_string_lossy().into_owned(),
        mount_point: disk.mount_point().to_path_buf(),
        removable: disk.is_removable(),
        total_bytes: disk.total_space(),
        available_bytes: disk.available_space(),
    }));
    debug!(count = drives.len(), "found removable drives");
    drives
}
