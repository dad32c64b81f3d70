//! Error types shared across the crate.

use crate::family::Family;
use thiserror::Error;

/// Errors produced by address construction, conversion and arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrError {
    #[error("unable to parse {family} address from {text:?}")]
    Parse { family: Family, text: String },

    #[error("{mask:?} is not a prefix length or netmask for {family}")]
    InvalidMask { family: Family, mask: String },

    #[error("{value:#x} offset by {offset} is outside the {family} address space")]
    Overflow {
        family: Family,
        value: u128,
        offset: i128,
    },

    #[error("family mismatch: {left} vs {right}")]
    FamilyMismatch { left: Family, right: Family },

    #[error("offset {offset} out of range for a network of {size} addresses")]
    IndexOutOfRange { offset: i128, size: u128 },

    #[error("prefix length {given} conflicts with /{in_text} in the address text")]
    PrefixConflict { in_text: u8, given: u8 },

    #[error("network {network} lies outside bound {bound}")]
    OutOfBounds { bound: String, network: String },

    #[error("unable to infer an address family: {0}")]
    UnknownFamily(String),
}

pub type AddrResult<T> = std::result::Result<T, AddrError>;
