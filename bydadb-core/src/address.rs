//! Head-unit address validation.
//!
//! The check is purely syntactic: four dot-separated groups of one to three
//! digits. Group values are not range-checked here, so addresses saved by
//! earlier versions keep loading. The range is enforced by
//! [`DeviceAddress::socket_addr`], right before an address is dialled.
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::LazyLock;

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("dotted-quad pattern is valid")
});

/// Returns `true` if `ip` looks like a dotted-quad IPv4 address.
///
/// `"999.999.999.999"` is accepted.
pub fn is_valid_address(ip: &str) -> bool {
    DOTTED_QUAD.is_match(ip)
}

/// A head-unit address that passed [`is_valid_address`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Validates `input` after trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if is_valid_address(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(Error::InvalidAddress(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the socket address ADB dials, failing if any octet exceeds 255.
    pub fn socket_addr(&self, port: u16) -> Result<SocketAddrV4> {
        // Parsed per octet: `Ipv4Addr::from_str` rejects leading zeros,
        // which the validator allows.
        let mut octets = [0u8; 4];
        for (slot, group) in octets.iter_mut().zip(self.0.split('.')) {
            *slot = group
                .parse()
                .map_err(|_| Error::AddressOutOfRange(self.0.clone()))?;
        }
        Ok(SocketAddrV4::new(Ipv4Addr::from(octets), port))
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
