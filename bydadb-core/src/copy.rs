//! Contains the logic for copying APK files onto a USB drive.
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension that marks an Android package.
pub const PACKAGE_EXTENSION: &str = ".apk";

/// A single file that reached the destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopiedPackage {
    pub file_name: String,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// The outcome of a completed copy run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: Vec<CopiedPackage>,
}

impl CopySummary {
    pub fn count(&self) -> usize {
        self.copied.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.copied.iter().map(|c| c.bytes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_empty()
    }
}

/// Returns `true` if `file_name` ends with [`PACKAGE_EXTENSION`].
pub fn is_package_name(file_name: &str) -> bool {
    file_name.ends_with(PACKAGE_EXTENSION)
}

/// Lists the APK files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into and entries that are not regular
/// files are skipped even if their name ends in `.apk`.
pub fn list_packages(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::SourceMissing(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| Error::io(format!("Could not list {}", dir.display()), e))?;

    collect_packages(dir, entries.map(|entry| entry.map(|e| e.path())))
}

/// Keeps the APK files among `entries`. An entry that cannot be read ends
/// the listing.
fn collect_packages(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    let mut packages = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| Error::io(format!("Could not read an entry in {}", dir.display()), e))?;
        let is_package = path
            .file_name()
            .is_some_and(|name| is_package_name(&name.to_string_lossy()));
        if is_package && path.is_file() {
            packages.push(path);
        }
    }

    packages.sort();
    Ok(packages)
}

/// Copies every APK in `source` into `destination`.
///
/// Existing files with the same name in `destination` are overwritten. The
/// run stops at the first failure; files copied before it stay in place.
///
/// # Arguments
///
/// * `source` - Folder holding the APKs to copy.
/// * `destination` - Mounted USB drive (or any folder) to copy into.
/// * `cancel` - Checked before each file.
/// * `on_start` - Called once with the number of files about to be copied.
/// * `on_copied` - Called after each file lands.
///
/// # Errors
///
/// - [`Error::DestinationMissing`] if `destination` is not an existing
///   directory. Nothing is copied in that case.
/// - [`Error::SourceMissing`] if `source` does not exist.
/// - [`Error::Io`] if listing or copying fails.
/// - [`Error::Cancelled`] if the token is cancelled between files.
pub fn run<F>(
    source: &Path,
    destination: &Path,
    cancel: &CancelToken,
    on_start: impl FnOnce(usize),
    mut on_copied: F,
) -> Result<CopySummary>
where
    F: FnMut(&CopiedPackage),
{
    if !destination.is_dir() {
        return Err(Error::DestinationMissing(destination.to_path_buf()));
    }

    let packages = list_packages(source)?;
    on_start(packages.len());

    let mut summary = CopySummary::default();
    for package in packages {
        cancel.check()?;

        let Some(file_name) = package.file_name() else {
            continue;
        };
        let target = destination.join(file_name);
        debug!(from = %package.display(), to = %target.display(), "copying package");

        let bytes = fs::copy(&package, &target).map_err(|e| {
            Error::io(
                format!("An error occurred while copying {}", package.display()),
                e,
            )
        })?;

        let copied = CopiedPackage {
            file_name: file_name.to_string_lossy().into_owned(),
            destination: target,
            bytes,
        };
        on_copied(&copied);
        summary.copied.push(copied);
    }

    info!(
        count = summary.count(),
        bytes = summary.total_bytes(),
        destination = %destination.display(),
        "copy finished"
    );
    Ok(summary)
}
