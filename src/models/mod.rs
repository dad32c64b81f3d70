//! Domain models for network address math.
//!
//! This module contains the core value types:
//! - [`Address`] - a family-tagged network address with CIDR arithmetic
//! - [`HostAddress`] - the single-address specialization
//! - [`AddressSpace`] - a sorted collection of networks with an optional bound

pub mod address;
mod host;
mod space;

// Re-export public types
pub use address::{Address, Hosts, MaskSpec};
pub use host::HostAddress;
pub use space::{AddressSpace, NetworkSpec};
