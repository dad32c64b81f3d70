//! The core network address type.

use crate::error::{AddrError, AddrResult};
use crate::family::Family;
use crate::parse::{self, FormatOptions};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A network address: a family tag, a raw integer value and a prefix length.
///
/// The value is kept as given; bits beyond the prefix length are preserved,
/// so `10.0.0.9/24` and `10.0.0.0/24` are distinct addresses inside the same
/// network. [`Address::network_base`] clears the host bits explicitly.
///
/// Every modifying operation returns a new value; an `Address` never changes
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    family: Family,
    value: u128,
    prefix_len: u8,
}

/// Anything that can name a netmask: a prefix length, a netmask integer,
/// decimal or netmask text, or another address holding a netmask value.
///
/// Integers that fit the family's prefix range are taken as prefix lengths;
/// anything larger is looked up as a netmask.
#[derive(Debug, Clone, Copy)]
pub enum MaskSpec<'a> {
    Int(u128),
    Text(&'a str),
    Addr(&'a Address),
}

impl MaskSpec<'_> {
    /// Normalize to a prefix length for `family`.
    pub fn to_prefix_length(&self, family: Family) -> AddrResult<u8> {
        match self {
            MaskSpec::Int(raw) => {
                if *raw <= u128::from(family.bit_length()) {
                    return Ok(*raw as u8);
                }
                family
                    .prefix_from_netmask(*raw)
                    .ok_or_else(|| AddrError::InvalidMask {
                        family,
                        mask: raw.to_string(),
                    })
            }
            MaskSpec::Text(text) => {
                let invalid = || AddrError::InvalidMask {
                    family,
                    mask: text.to_string(),
                };
                if parse::is_decimal(text) {
                    let raw = text.parse::<u128>().map_err(|_| invalid())?;
                    MaskSpec::Int(raw).to_prefix_length(family)
                } else {
                    let (value, suffix) = parse::parse(family, text).map_err(|_| invalid())?;
                    if suffix.is_some() {
                        return Err(invalid());
                    }
                    family.prefix_from_netmask(value).ok_or_else(invalid)
                }
            }
            MaskSpec::Addr(address) => {
                if address.family() != family {
                    return Err(AddrError::FamilyMismatch {
                        left: family,
                        right: address.family(),
                    });
                }
                family
                    .prefix_from_netmask(address.value())
                    .ok_or_else(|| AddrError::InvalidMask {
                        family,
                        mask: address.to_string(),
                    })
            }
        }
    }
}

impl From<u8> for MaskSpec<'static> {
    fn from(raw: u8) -> Self {
        MaskSpec::Int(u128::from(raw))
    }
}

impl From<u32> for MaskSpec<'static> {
    fn from(raw: u32) -> Self {
        MaskSpec::Int(u128::from(raw))
    }
}

impl From<u128> for MaskSpec<'static> {
    fn from(raw: u128) -> Self {
        MaskSpec::Int(raw)
    }
}

impl From<i32> for MaskSpec<'static> {
    fn from(raw: i32) -> Self {
        // Negative integers can never name a mask; map them to a value the
        // lookup will reject.
        MaskSpec::Int(raw.try_into().unwrap_or(u128::MAX))
    }
}

impl<'a> From<&'a str> for MaskSpec<'a> {
    fn from(text: &'a str) -> Self {
        MaskSpec::Text(text)
    }
}

impl<'a> From<&'a Address> for MaskSpec<'a> {
    fn from(address: &'a Address) -> Self {
        MaskSpec::Addr(address)
    }
}

impl Address {
    /// Constructor for crate code whose inputs are already in range.
    pub(crate) fn new_unchecked(family: Family, value: u128, prefix_len: u8) -> Address {
        debug_assert!(value <= family.max_int());
        debug_assert!(family.valid_prefix_length(prefix_len));
        Address {
            family,
            value,
            prefix_len,
        }
    }

    /// Build an address from its integer value. Without a prefix length the
    /// result is a host address.
    pub fn from_integer(
        value: u128,
        prefix_length: Option<u8>,
        family: Family,
    ) -> AddrResult<Address> {
        let prefix_len = prefix_length.unwrap_or_else(|| family.bit_length());
        if !family.valid_prefix_length(prefix_len) {
            return Err(AddrError::InvalidMask {
                family,
                mask: prefix_len.to_string(),
            });
        }
        if value > family.max_int() {
            return Err(AddrError::Overflow {
                family,
                value,
                offset: 0,
            });
        }
        Ok(Address {
            family,
            value,
            prefix_len,
        })
    }

    /// Parse an address of a known family, with an optional mask argument.
    ///
    /// A `/len` inside the text wins over the argument; if both are present
    /// and disagree the call fails rather than guessing.
    pub fn from_string(
        text: &str,
        mask: Option<MaskSpec<'_>>,
        family: Family,
    ) -> AddrResult<Address> {
        let (value, in_text) = parse::parse(family, text)?;
        let given = match mask {
            Some(spec) => Some(spec.to_prefix_length(family)?),
            None => None,
        };
        let prefix_len = match (in_text, given) {
            (Some(t), Some(g)) if t != g => {
                return Err(AddrError::PrefixConflict { in_text: t, given: g })
            }
            (Some(t), _) => t,
            (None, Some(g)) => g,
            (None, None) => family.bit_length(),
        };
        Ok(Address {
            family,
            value,
            prefix_len,
        })
    }

    /// Copy another address, optionally overriding its prefix length.
    pub fn from_other(address: &Address, prefix_length: Option<u8>) -> AddrResult<Address> {
        match prefix_length {
            Some(prefix_len) => address.mask(prefix_len),
            None => Ok(*address),
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// The raw integer value, host bits included.
    pub fn value(&self) -> u128 {
        self.value
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_len
    }

    /// True if this network holds exactly one address.
    pub fn is_host(&self) -> bool {
        self.prefix_len == self.family.bit_length()
    }

    /// The netmask as an integer.
    pub fn netmask(&self) -> u128 {
        self.family.netmask(self.prefix_len)
    }

    /// The wildcard (hostmask) as an integer: the complement of the netmask
    /// within the family's bit width.
    pub fn wildcard(&self) -> u128 {
        self.family.hostmask(self.prefix_len)
    }

    /// Number of addresses in the network.
    ///
    /// Saturates at `u128::MAX` for the one network it cannot represent,
    /// the full IPv6 space `::/0`.
    pub fn size(&self) -> u128 {
        self.wildcard().saturating_add(1)
    }

    pub(crate) fn first_value(&self) -> u128 {
        self.value & self.netmask()
    }

    pub(crate) fn last_value(&self) -> u128 {
        self.first_value() | self.wildcard()
    }

    /// A copy with the prefix length replaced. Accepts anything
    /// [`MaskSpec`] can normalize.
    pub fn mask<'a>(&self, mask: impl Into<MaskSpec<'a>>) -> AddrResult<Address> {
        let prefix_len = mask.into().to_prefix_length(self.family)?;
        Ok(Address {
            prefix_len,
            ..*self
        })
    }

    /// The address with all bits beyond the prefix length cleared.
    pub fn network_base(&self) -> Address {
        Address {
            value: self.first_value(),
            ..*self
        }
    }

    /// The first host address in the network.
    pub fn first(&self) -> Address {
        Address {
            family: self.family,
            value: self.first_value(),
            prefix_len: self.family.bit_length(),
        }
    }

    /// The last host address in the network, by convention the broadcast
    /// address in IP networks.
    pub fn last(&self) -> Address {
        Address {
            family: self.family,
            value: self.last_value(),
            prefix_len: self.family.bit_length(),
        }
    }

    /// Alias of [`Address::last`].
    pub fn broadcast(&self) -> Address {
        self.last()
    }

    /// The inclusive range of host addresses in the network.
    pub fn to_range(&self) -> RangeInclusive<Address> {
        self.first()..=self.last()
    }

    /// Shift the raw value by a signed offset, keeping family and prefix
    /// length.
    pub fn add(&self, offset: i128) -> AddrResult<Address> {
        let shifted = if offset >= 0 {
            self.value.checked_add(offset as u128)
        } else {
            self.value.checked_sub(offset.unsigned_abs())
        };
        let value = shifted
            .filter(|v| *v <= self.family.max_int())
            .ok_or(AddrError::Overflow {
                family: self.family,
                value: self.value,
                offset,
            })?;
        Ok(Address { value, ..*self })
    }

    /// Shift the raw value backwards by a signed offset.
    pub fn sub(&self, offset: i128) -> AddrResult<Address> {
        match offset.checked_neg() {
            Some(negated) => self.add(negated),
            // -(i128::MIN) does not fit; apply the magnitude directly
            None => {
                let value = self
                    .value
                    .checked_add(1u128 << 127)
                    .filter(|v| *v <= self.family.max_int())
                    .ok_or(AddrError::Overflow {
                        family: self.family,
                        value: self.value,
                        offset,
                    })?;
                Ok(Address { value, ..*self })
            }
        }
    }

    /// The host address at `offset` within the network. Negative offsets
    /// count back from the last address.
    pub fn at(&self, offset: i128) -> AddrResult<Address> {
        if offset == 0 && self.is_host() {
            return Ok(*self);
        }
        let span = self.wildcard();
        let out_of_range = || AddrError::IndexOutOfRange {
            offset,
            size: self.size(),
        };
        let index = if offset >= 0 {
            let index = offset as u128;
            if index > span {
                return Err(out_of_range());
            }
            index
        } else {
            let magnitude = offset.unsigned_abs();
            if magnitude > span {
                return Err(out_of_range());
            }
            span - (magnitude - 1)
        };
        Ok(Address {
            family: self.family,
            value: self.first_value() + index,
            prefix_len: self.family.bit_length(),
        })
    }

    /// Iterate every host address in the network, lazily and in order.
    /// Each call starts a fresh pass.
    pub fn hosts(&self) -> Hosts {
        Hosts {
            family: self.family,
            base: self.first_value(),
            span: self.wildcard(),
            next: 0,
            done: false,
        }
    }

    /// Widen the network: decrease the prefix length by `bits`. The result
    /// covers the original.
    pub fn grow(&self, bits: u8) -> AddrResult<Address> {
        let prefix_len = self
            .prefix_len
            .checked_sub(bits)
            .ok_or_else(|| AddrError::InvalidMask {
                family: self.family,
                mask: format!("{}", i16::from(self.prefix_len) - i16::from(bits)),
            })?;
        Ok(Address {
            prefix_len,
            ..*self
        })
    }

    /// Narrow the network: increase the prefix length by `bits`. The
    /// original covers the result.
    pub fn shrink(&self, bits: u8) -> AddrResult<Address> {
        let prefix_len = self.prefix_len.saturating_add(bits);
        if !self.family.valid_prefix_length(prefix_len) {
            return Err(AddrError::InvalidMask {
                family: self.family,
                mask: (u16::from(self.prefix_len) + u16::from(bits)).to_string(),
            });
        }
        Ok(Address {
            prefix_len,
            ..*self
        })
    }

    /// True if this network's address range encloses the other's.
    pub fn cover(&self, other: &Address) -> AddrResult<bool> {
        self.same_family(other)?;
        Ok(self.covers_values(other))
    }

    /// True if either network encloses the other.
    pub fn overlap(&self, other: &Address) -> AddrResult<bool> {
        self.same_family(other)?;
        Ok(self.covers_values(other) || other.covers_values(self))
    }

    /// Coverage test for callers that already hold two same-family
    /// addresses (the space algebra guarantees it structurally).
    pub(crate) fn covers_values(&self, other: &Address) -> bool {
        self.first_value() <= other.first_value() && other.last_value() <= self.last_value()
    }

    /// The smallest single network covering both, if one exists that covers
    /// nothing else: either network when it already covers the other, or
    /// the one-bit-wider common network when the two are siblings.
    pub fn summarize_with(&self, other: &Address) -> Option<Address> {
        if self.family != other.family {
            return None;
        }
        if self.covers_values(other) {
            return Some(*self);
        }
        if other.covers_values(self) {
            return Some(*other);
        }
        if self.prefix_len != other.prefix_len || self.prefix_len == 0 {
            return None;
        }
        let grown_prefix = self.prefix_len - 1;
        let grown_mask = self.family.netmask(grown_prefix);
        if self.value & grown_mask == other.value & grown_mask {
            Some(Address {
                family: self.family,
                value: self.value & grown_mask,
                prefix_len: grown_prefix,
            })
        } else {
            None
        }
    }

    /// The rfc791 class prefix length for an IPv4 address: 8 for class A,
    /// 16 for class B, 24 for class C. `None` for class D/E and for other
    /// families.
    pub fn classful_prefix_length(&self) -> Option<u8> {
        if self.family != Family::Ipv4 {
            return None;
        }
        match self.value {
            v if v < 0x8000_0000 => Some(8),
            v if v < 0xC000_0000 => Some(16),
            v if v < 0xE000_0000 => Some(24),
            _ => None,
        }
    }

    /// The address re-masked to its rfc791 class, when it has one.
    pub fn classful(&self) -> Option<Address> {
        self.classful_prefix_length().map(|prefix_len| Address {
            prefix_len,
            ..*self
        })
    }

    /// Render with explicit [`FormatOptions`].
    pub fn format_with(&self, options: FormatOptions) -> String {
        parse::format(self.family, self.value, self.prefix_len, options)
    }

    fn same_family(&self, other: &Address) -> AddrResult<()> {
        if self.family == other.family {
            Ok(())
        } else {
            Err(AddrError::FamilyMismatch {
                left: self.family,
                right: other.family,
            })
        }
    }
}

impl Ord for Address {
    /// Family first, then value; at equal value the more specific prefix
    /// compares less.
    fn cmp(&self, other: &Self) -> Ordering {
        self.family
            .cmp(&other.family)
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| other.prefix_len.cmp(&self.prefix_len))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<u128> for Address {
    /// Exact match on the raw value, the caller asserting the integer is
    /// from the same family space.
    fn eq(&self, other: &u128) -> bool {
        self.value == *other
    }
}

impl PartialEq<Address> for u128 {
    fn eq(&self, other: &Address) -> bool {
        *self == other.value
    }
}

impl PartialOrd<u128> for Address {
    fn partial_cmp(&self, other: &u128) -> Option<Ordering> {
        Some(self.value.cmp(other))
    }
}

impl PartialOrd<Address> for u128 {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        Some(self.cmp(&other.value))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.format_with(FormatOptions {
                cidr: true,
                expand: false
            })
        )
    }
}

impl FromStr for Address {
    type Err = AddrError;

    /// Family-guessing parse, trying IPv4, IPv6 and MAC-48 in that fixed
    /// order.
    fn from_str(s: &str) -> AddrResult<Address> {
        for family in Family::ALL {
            if let Ok(address) = Address::from_string(s, None, family) {
                return Ok(address);
            }
        }
        Err(AddrError::UnknownFamily(s.to_string()))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Lazy host enumeration over a network, created by [`Address::hosts`].
#[derive(Debug, Clone)]
pub struct Hosts {
    family: Family,
    base: u128,
    span: u128,
    next: u128,
    done: bool,
}

impl Iterator for Hosts {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.done {
            return None;
        }
        let address = Address {
            family: self.family,
            value: self.base + self.next,
            prefix_len: self.family.bit_length(),
        };
        if self.next == self.span {
            self.done = true;
        } else {
            self.next += 1;
        }
        Some(address)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.span - self.next;
        match usize::try_from(remaining) {
            Ok(r) if r < usize::MAX => (r + 1, Some(r + 1)),
            _ => (usize::MAX, None),
        }
    }
}
