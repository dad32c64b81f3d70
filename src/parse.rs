//! Lexical parsing and formatting of address text.
//!
//! The value model in [`models`](crate::models) is integer-based; this module
//! is the boundary where text becomes `(value, optional prefix length)` pairs
//! and back. IPv4 and IPv6 lexing delegates to the `std::net` parsers, MAC-48
//! is matched by pattern.

use crate::error::{AddrError, AddrResult};
use crate::family::Family;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Rendering options for [`format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Append the `/len` prefix length.
    pub cidr: bool,
    /// Render IPv6 in the full uncompressed eight-group form.
    pub expand: bool,
}

lazy_static! {
    static ref MAC: Regex =
        Regex::new(r"^(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("Invalid Regex?");
    static ref DECIMAL: Regex = Regex::new(r"^\d+$").expect("Invalid Regex?");
}

/// Parse `text` as an address of `family`, with an optional `/len` suffix.
///
/// Returns the raw integer value and the prefix length found in the text,
/// if any. The prefix length is range-checked against the family.
pub(crate) fn parse(family: Family, text: &str) -> AddrResult<(u128, Option<u8>)> {
    let text = text.trim();
    let (address_text, prefix_text) = match text.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (text, None),
    };

    let prefix_length = match prefix_text {
        Some(raw) => {
            let parsed = raw.parse::<u8>().ok().filter(|p| family.valid_prefix_length(*p));
            match parsed {
                Some(p) => Some(p),
                None => {
                    return Err(AddrError::InvalidMask {
                        family,
                        mask: raw.to_string(),
                    })
                }
            }
        }
        None => None,
    };

    let value = parse_bare(family, address_text).ok_or_else(|| AddrError::Parse {
        family,
        text: text.to_string(),
    })?;
    Ok((value, prefix_length))
}

/// Parse address text without a prefix suffix.
fn parse_bare(family: Family, text: &str) -> Option<u128> {
    match family {
        Family::Ipv4 => Ipv4Addr::from_str(text).ok().map(|a| u128::from(u32::from(a))),
        Family::Ipv6 => Ipv6Addr::from_str(text).ok().map(u128::from),
        Family::Mac => parse_mac(text),
    }
}

fn parse_mac(text: &str) -> Option<u128> {
    if !MAC.is_match(text) {
        return None;
    }
    let mut value: u128 = 0;
    for octet in text.split(&[':', '-'][..]) {
        value = (value << 8) | u128::from_str_radix(octet, 16).ok()?;
    }
    Some(value)
}

/// True if `text` is a bare decimal integer (a textual prefix length rather
/// than a netmask in address notation).
pub(crate) fn is_decimal(text: &str) -> bool {
    DECIMAL.is_match(text)
}

/// Render `(family, value, prefix_length)` as text.
pub(crate) fn format(
    family: Family,
    value: u128,
    prefix_length: u8,
    options: FormatOptions,
) -> String {
    let base = match family {
        Family::Ipv4 => Ipv4Addr::from(value as u32).to_string(),
        Family::Ipv6 if options.expand => {
            let groups: Vec<String> = (0..8)
                .rev()
                .map(|i| format!("{:04x}", (value >> (i * 16)) & 0xFFFF))
                .collect();
            groups.join(":")
        }
        Family::Ipv6 => Ipv6Addr::from(value).to_string(),
        Family::Mac => {
            let octets: Vec<String> = (0..6)
                .rev()
                .map(|i| format!("{:02x}", (value >> (i * 8)) & 0xFF))
                .collect();
            octets.join(":")
        }
    };
    if options.cidr {
        format!("{base}/{prefix_length}")
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse(Family::Ipv4, "1.0.0.0").unwrap(), (0x0100_0000, None));
        assert_eq!(
            parse(Family::Ipv4, "10.0.0.0/24").unwrap(),
            (0x0A00_0000, Some(24))
        );
        assert_eq!(
            parse(Family::Ipv4, " 192.168.1.42/32 ").unwrap(),
            (0xC0A8_012A, Some(32))
        );

        assert!(parse(Family::Ipv4, "10.0.0").is_err());
        assert!(parse(Family::Ipv4, "10.0.0.256").is_err());
        assert_eq!(
            parse(Family::Ipv4, "10.0.0.0/33").unwrap_err(),
            AddrError::InvalidMask {
                family: Family::Ipv4,
                mask: "33".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ipv6() {
        assert_eq!(parse(Family::Ipv6, "::1").unwrap(), (1, None));
        assert_eq!(
            parse(Family::Ipv6, "2001:db8::/32").unwrap(),
            (0x2001_0db8_0000_0000_0000_0000_0000_0000, Some(32))
        );
        assert!(parse(Family::Ipv6, "2001:db8::/129").is_err());
        assert!(parse(Family::Ipv6, "1.2.3.4x").is_err());
    }

    #[test]
    fn test_parse_mac() {
        assert_eq!(
            parse(Family::Mac, "aa:bb:cc:dd:ee:ff").unwrap(),
            (0xAABB_CCDD_EEFF, None)
        );
        assert_eq!(
            parse(Family::Mac, "00-00-5e-00-53-01/48").unwrap(),
            (0x0000_5E00_5301, Some(48))
        );
        assert!(parse(Family::Mac, "aa:bb:cc:dd:ee").is_err());
        assert!(parse(Family::Mac, "aa:bb:cc:dd:ee:gg").is_err());
    }

    #[test]
    fn test_format_ipv4() {
        let options = FormatOptions { cidr: true, expand: false };
        assert_eq!(format(Family::Ipv4, 0x0100_0000, 24, options), "1.0.0.0/24");
        assert_eq!(
            format(Family::Ipv4, 0x0100_0000, 24, FormatOptions::default()),
            "1.0.0.0"
        );
    }

    #[test]
    fn test_format_ipv6() {
        let value = 0x2001_0db8_0000_0000_0000_0000_0000_0001;
        assert_eq!(
            format(Family::Ipv6, value, 128, FormatOptions { cidr: false, expand: false }),
            "2001:db8::1"
        );
        assert_eq!(
            format(Family::Ipv6, value, 128, FormatOptions { cidr: false, expand: true }),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
    }

    #[test]
    fn test_format_mac() {
        assert_eq!(
            format(Family::Mac, 0x0000_5E00_5301, 48, FormatOptions { cidr: false, expand: false }),
            "00:00:5e:00:53:01"
        );
    }

    #[test]
    fn test_is_decimal() {
        assert!(is_decimal("24"));
        assert!(!is_decimal("255.255.255.0"));
        assert!(!is_decimal(""));
    }
}
