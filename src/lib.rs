//! IP and MAC network math: CIDR arithmetic, summarization and gap finding.
//!
//! The crate is built around three values: [`Address`] (a family-tagged
//! network address), [`HostAddress`] (an address known to be a single host)
//! and [`AddressSpace`] (a sorted collection of networks, optionally held
//! inside a containing network). On top of them sit the set operations:
//! [`AddressSpace::summarize`] merges adjacent and nested CIDR blocks,
//! [`AddressSpace::gaps`] tiles the unused remainder of a bound with
//! maximal blocks.
//!
//! ```
//! use netspace::{Address, AddressSpace, Family};
//!
//! let space = AddressSpace::with_family(
//!     Family::Ipv4,
//!     ["1.0.0.0/24", "1.0.1.0/24"],
//!     None,
//! )?;
//! let summary = space.summarize();
//! assert_eq!(summary.networks(), &["1.0.0.0/23".parse::<Address>()?]);
//! # Ok::<(), netspace::AddrError>(())
//! ```

mod error;
mod family;
mod parse;

pub mod models;
pub mod processing;

pub use error::{AddrError, AddrResult};
pub use family::Family;
pub use models::{Address, AddressSpace, HostAddress, Hosts, MaskSpec, NetworkSpec};
pub use parse::FormatOptions;
