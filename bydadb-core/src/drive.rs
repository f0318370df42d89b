use std::fmt;
use std::path::PathBuf;

/// A removable drive that is mounted and can receive APK files.
///
/// Populated by [`crate::platform::get_removable_drives`].
#[derive(Clone, Debug, PartialEq)]
pub struct UsbDrive {
    /// Where the drive's file system is mounted (e.g. `/media/user/USB` or `E:\`).
    pub mount_point: PathBuf,
    /// The name the operating system reports for the volume.
    pub name: String,
    /// Total capacity in gigabytes (GB).
    pub size_gb: f64,
    /// Free space in gigabytes (GB).
    pub free_gb: f64,
}

impl fmt::Display for UsbDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "[Unnamed]"
        } else {
            self.name.as_str()
        };

        write!(
            f,
            "{:<30} {:<15} {:.1}/{:.1} GB free",
            self.mount_point.display(),
            name,
            self.free_gb,
            self.size_gb
        )
    }
}
