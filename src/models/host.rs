//! Host addresses: networks of exactly one address.

use crate::error::{AddrError, AddrResult};
use crate::family::Family;
use crate::models::address::Address;
use std::fmt;

/// A typed view over an [`Address`] whose prefix length equals the family
/// bit width.
///
/// `Address` already answers `is_host()` and fast-paths host cases
/// internally; this wrapper exists for callers that want the single-address
/// guarantee in the type, with the trivial overrides that follow from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostAddress(Address);

impl HostAddress {
    /// Wrap an address, failing unless it is a host network.
    pub fn new(address: Address) -> AddrResult<HostAddress> {
        if address.is_host() {
            Ok(HostAddress(address))
        } else {
            Err(AddrError::InvalidMask {
                family: address.family(),
                mask: address.prefix_length().to_string(),
            })
        }
    }

    /// Host address for a raw integer value.
    pub fn from_value(value: u128, family: Family) -> AddrResult<HostAddress> {
        Ok(HostAddress(Address::from_integer(value, None, family)?))
    }

    pub fn address(&self) -> &Address {
        &self.0
    }

    pub fn family(&self) -> Family {
        self.0.family()
    }

    pub fn value(&self) -> u128 {
        self.0.value()
    }

    /// Always one.
    pub fn size(&self) -> u128 {
        1
    }

    /// A host is its own first address.
    pub fn first(&self) -> HostAddress {
        *self
    }

    /// A host is its own last address.
    pub fn last(&self) -> HostAddress {
        *self
    }

    /// A host covers only itself.
    pub fn cover(&self, other: &HostAddress) -> AddrResult<bool> {
        self.0.cover(&other.0)
    }

    /// The single-element enumeration.
    pub fn hosts(&self) -> std::iter::Once<Address> {
        std::iter::once(self.0)
    }
}

impl From<HostAddress> for Address {
    fn from(host: HostAddress) -> Address {
        *host.address()
    }
}

impl TryFrom<Address> for HostAddress {
    type Error = AddrError;

    fn try_from(address: Address) -> AddrResult<HostAddress> {
        HostAddress::new(address)
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
