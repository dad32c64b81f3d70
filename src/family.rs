//! Address families and their bit-level constants.
//!
//! Every other module consults this one for bit widths and for the
//! prefix-length/netmask conversion tables.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The supported address families.
///
/// The derived order (IPv4, then IPv6, then MAC) is the cross-family sort
/// order used by [`Address`](crate::Address) comparisons.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Ipv4,
    Ipv6,
    Mac,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Ipv4, Family::Ipv6, Family::Mac];

    /// Number of bits in an address of this family.
    pub const fn bit_length(self) -> u8 {
        match self {
            Family::Ipv4 => 32,
            Family::Ipv6 => 128,
            Family::Mac => 48,
        }
    }

    /// The highest representable address value.
    pub const fn max_int(self) -> u128 {
        match self {
            Family::Ipv4 => u32::MAX as u128,
            Family::Ipv6 => u128::MAX,
            Family::Mac => (1 << 48) - 1,
        }
    }

    /// True if `prefix_length` fits this family.
    pub fn valid_prefix_length(self, prefix_length: u8) -> bool {
        prefix_length <= self.bit_length()
    }

    /// Netmask integer for the given prefix length: `prefix_length` leading
    /// one-bits within the family's width.
    ///
    /// # Panics
    /// Panics if `prefix_length` exceeds the family bit length. Callers
    /// validate through [`Family::valid_prefix_length`] first.
    pub fn netmask(self, prefix_length: u8) -> u128 {
        assert!(
            self.valid_prefix_length(prefix_length),
            "prefix length {} exceeds {} bit length",
            prefix_length,
            self
        );
        self.max_int() ^ self.hostmask(prefix_length)
    }

    /// Hostmask (wildcard) integer for the given prefix length: the
    /// complement of the netmask within the family's width. This is also
    /// the network size minus one, which unlike the size itself always
    /// fits in a `u128`.
    pub fn hostmask(self, prefix_length: u8) -> u128 {
        assert!(
            self.valid_prefix_length(prefix_length),
            "prefix length {} exceeds {} bit length",
            prefix_length,
            self
        );
        match prefix_length {
            0 => self.max_int(),
            p if p == self.bit_length() => 0,
            p => self.max_int() >> p,
        }
    }

    /// Reverse lookup: netmask integer to prefix length.
    ///
    /// Returns `None` for integers that are not a contiguous netmask of
    /// this family.
    pub fn prefix_from_netmask(self, netmask: u128) -> Option<u8> {
        NETMASK_TO_PREFIX.get(&(self, netmask)).copied()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::Ipv4 => write!(f, "IPv4"),
            Family::Ipv6 => write!(f, "IPv6"),
            Family::Mac => write!(f, "MAC-48"),
        }
    }
}

lazy_static! {
    /// All valid netmasks per family, mapped back to their prefix lengths.
    /// Built once; read-only afterwards.
    static ref NETMASK_TO_PREFIX: HashMap<(Family, u128), u8> = {
        let mut table = HashMap::new();
        for family in Family::ALL {
            for prefix_length in 0..=family.bit_length() {
                table.insert((family, family.netmask(prefix_length)), prefix_length);
            }
        }
        table
    };
}
