//! Persistence of recently used head-unit addresses.
//!
//! The file is plain text, one address per line, most recent last. It carries
//! no header or version and is rewritten as a whole on every save.
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How many addresses are remembered.
pub const MAX_RECENT: usize = 3;

/// File name used when no other path is configured.
pub const DEFAULT_FILE: &str = ".ips.dat";

/// The recent-address list, bound to a file on disk.
///
/// Nothing is cached: every call opens, reads or writes, and closes the file.
/// There is no locking, so two instances saving at once may lose an entry.
#[derive(Clone, Debug)]
pub struct RecentAddresses {
    path: PathBuf,
}

impl RecentAddresses {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored addresses, oldest first. A missing file is an
    /// empty list.
    pub fn load(&self) -> Result<Vec<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Error::Store {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Records `address` as the most recent one and returns the new list.
    ///
    /// An existing equal entry is moved rather than duplicated, and only the
    /// last [`MAX_RECENT`] entries are kept.
    pub fn save(&self, address: &str) -> Result<Vec<String>> {
        let address = address.trim();
        let mut addresses = self.load()?;
        addresses.retain(|a| a != address);
        addresses.push(address.to_string());
        if addresses.len() > MAX_RECENT {
            addresses.drain(..addresses.len() - MAX_RECENT);
        }

        let mut contents = addresses.join("\n");
        contents.push('\n');
        fs::write(&self.path, contents).map_err(|source| Error::Store {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = addresses.len(), "saved recent addresses");
        Ok(addresses)
    }
}

impl Default for RecentAddresses {
    fn default() -> Self {
        Self::open(DEFAULT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> RecentAddresses {
        RecentAddresses::open(dir.join(DEFAULT_FILE))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        assert!(store_in(dir.path()).load().unwrap().is_empty());
    }

    #[test]
    fn keeps_last_three_most_recent_last() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"] {
            store.save(ip).unwrap();
        }
        assert_eq!(
            store.load().unwrap(),
            vec!["10.0.0.2", "10.0.0.3", "10.0.0.4"]
        );
    }

    #[test]
    fn resaving_moves_entry_to_end() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3"] {
            store.save(ip).unwrap();
        }
        let list = store.save("10.0.0.1").unwrap();
        assert_eq!(list, vec!["10.0.0.2", "10.0.0.3", "10.0.0.1"]);
        assert_eq!(store.load().unwrap(), list);
    }

    #[test]
    fn file_is_newline_terminated_plain_text() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("192.168.1.100").unwrap();
        store.save("192.168.1.101").unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "192.168.1.100\n192.168.1.101\n");
    }

    #[test]
    fn tolerates_blank_lines_and_padding() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), "\n 10.0.0.1 \r\n\n10.0.0.2\n").unwrap();
        assert_eq!(store.load().unwrap(), vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn save_into_missing_directory_is_a_store_error() {
        let dir = tempdir().unwrap();
        let store = RecentAddresses::open(dir.path().join("no/such/dir/.ips.dat"));
        let err = store.save("10.0.0.1").unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
    }
}
