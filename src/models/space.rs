//! Address spaces: sorted single-family network collections with an
//! optional containing bound.

use crate::error::{AddrError, AddrResult};
use crate::family::Family;
use crate::models::Address;
use crate::processing::{gaps, summarize};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The member forms accepted by [`AddressSpace`] construction: a ready
/// address, address text, or a raw integer value (imported as a host).
#[derive(Debug, Clone)]
pub enum NetworkSpec {
    Addr(Address),
    Text(String),
    Int(u128),
}

impl From<Address> for NetworkSpec {
    fn from(address: Address) -> Self {
        NetworkSpec::Addr(address)
    }
}

impl From<&Address> for NetworkSpec {
    fn from(address: &Address) -> Self {
        NetworkSpec::Addr(*address)
    }
}

impl From<&str> for NetworkSpec {
    fn from(text: &str) -> Self {
        NetworkSpec::Text(text.to_string())
    }
}

impl From<String> for NetworkSpec {
    fn from(text: String) -> Self {
        NetworkSpec::Text(text)
    }
}

impl From<u128> for NetworkSpec {
    fn from(value: u128) -> Self {
        NetworkSpec::Int(value)
    }
}

/// A sorted collection of non-overlapping-or-nested networks of one family,
/// optionally constrained to a containing network.
///
/// Members are normalized to their network base on import and kept sorted;
/// duplicates are allowed. Derived spaces (`union`, `summarize`, `gaps`)
/// are new values; nothing mutates in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpaceRepr")]
pub struct AddressSpace {
    family: Family,
    networks: Vec<Address>,
    bound: Option<Address>,
}

/// Wire shape for deserialization; re-validated through the checked
/// constructor.
#[derive(Deserialize)]
struct SpaceRepr {
    family: Family,
    networks: Vec<Address>,
    bound: Option<Address>,
}

impl TryFrom<SpaceRepr> for AddressSpace {
    type Error = AddrError;

    fn try_from(repr: SpaceRepr) -> AddrResult<AddressSpace> {
        AddressSpace::with_family(repr.family, repr.networks, repr.bound)
    }
}

impl AddressSpace {
    /// Build a space, inferring the family from the bound or the first
    /// address-typed member.
    pub fn new<I>(members: I, bound: Option<Address>) -> AddrResult<AddressSpace>
    where
        I: IntoIterator,
        I::Item: Into<NetworkSpec>,
    {
        let specs: Vec<NetworkSpec> = members.into_iter().map(Into::into).collect();
        let family = Self::infer_family(&specs, bound.as_ref())?;
        Self::build(family, specs, bound)
    }

    /// Build a space of a known family.
    pub fn with_family<I>(
        family: Family,
        members: I,
        bound: Option<Address>,
    ) -> AddrResult<AddressSpace>
    where
        I: IntoIterator,
        I::Item: Into<NetworkSpec>,
    {
        let specs: Vec<NetworkSpec> = members.into_iter().map(Into::into).collect();
        Self::build(family, specs, bound)
    }

    fn infer_family(specs: &[NetworkSpec], bound: Option<&Address>) -> AddrResult<Family> {
        if let Some(bound) = bound {
            return Ok(bound.family());
        }
        for spec in specs {
            if let NetworkSpec::Addr(address) = spec {
                return Ok(address.family());
            }
        }
        Err(AddrError::UnknownFamily(
            "no bound or address-typed member to infer from".to_string(),
        ))
    }

    fn build(
        family: Family,
        specs: Vec<NetworkSpec>,
        bound: Option<Address>,
    ) -> AddrResult<AddressSpace> {
        if let Some(bound) = &bound {
            if bound.family() != family {
                return Err(AddrError::FamilyMismatch {
                    left: family,
                    right: bound.family(),
                });
            }
        }

        let mut networks = Vec::with_capacity(specs.len());
        for spec in specs {
            let address = match spec {
                NetworkSpec::Addr(address) => {
                    if address.family() != family {
                        return Err(AddrError::FamilyMismatch {
                            left: family,
                            right: address.family(),
                        });
                    }
                    address
                }
                NetworkSpec::Text(text) => Address::from_string(&text, None, family)?,
                NetworkSpec::Int(value) => Address::from_integer(value, None, family)?,
            };
            networks.push(address.network_base());
        }
        networks.sort();

        if let Some(bound) = &bound {
            if let Some(outlier) = networks.iter().find(|n| !bound.covers_values(n)) {
                return Err(AddrError::OutOfBounds {
                    bound: bound.to_string(),
                    network: outlier.to_string(),
                });
            }
        }

        log::debug!(
            "built {family} space with {} networks, bound {}",
            networks.len(),
            bound.as_ref().map_or_else(|| "none".to_string(), |b| b.to_string()),
        );
        Ok(AddressSpace {
            family,
            networks,
            bound,
        })
    }

    /// Constructor for derived spaces whose invariants the caller upholds:
    /// sorted base-normalized members of `family`, covered by `bound`.
    fn from_parts(family: Family, networks: Vec<Address>, bound: Option<Address>) -> AddressSpace {
        AddressSpace {
            family,
            networks,
            bound,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// The member networks, sorted.
    pub fn networks(&self) -> &[Address] {
        &self.networks
    }

    /// The containing network, if one was given.
    pub fn bound(&self) -> Option<&Address> {
        self.bound.as_ref()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.networks.iter()
    }

    /// The raw set union: both member lists, re-sorted, not summarized.
    /// The result carries no bound.
    pub fn union(&self, other: &AddressSpace) -> AddrResult<AddressSpace> {
        if self.family != other.family {
            return Err(AddrError::FamilyMismatch {
                left: self.family,
                right: other.family,
            });
        }
        let mut networks = self.networks.clone();
        networks.extend(other.networks.iter().copied());
        networks.sort();
        Ok(AddressSpace::from_parts(self.family, networks, None))
    }

    /// Merge the members into the fewest covering blocks. Keeps the bound.
    pub fn summarize(&self) -> AddressSpace {
        let summarized = summarize::summarize(&self.networks);
        log::debug!(
            "summarized {} networks into {}",
            self.networks.len(),
            summarized.len()
        );
        AddressSpace::from_parts(self.family, summarized, self.bound)
    }

    /// Re-attach (or replace) the containing network, re-checking coverage.
    pub fn with_bound(&self, bound: Address) -> AddrResult<AddressSpace> {
        Self::with_family(self.family, self.networks.iter().copied(), Some(bound))
    }

    /// The member with the smallest size at or above `size`; ties go to the
    /// first in sorted order.
    pub fn find_minimum_size(&self, size: u128) -> Option<&Address> {
        self.networks
            .iter()
            .filter(|n| n.size() >= size)
            .min_by_key(|n| n.size())
    }

    /// The member with the smallest prefix length at or above `length`;
    /// ties go to the first in sorted order.
    pub fn find_minimum_prefix_length(&self, length: u8) -> Option<&Address> {
        self.networks
            .iter()
            .filter(|n| n.prefix_length() >= length)
            .min_by_key(|n| n.prefix_length())
    }

    /// The complement of the members within the bound: every address the
    /// bound covers that no member does, tiled with maximal blocks.
    ///
    /// Without a bound only the stretches between consecutive members are
    /// reported. With a bound and no members, the whole bound is the gap.
    pub fn gaps(&self) -> AddressSpace {
        if self.networks.is_empty() {
            let networks = match &self.bound {
                Some(bound) => vec![bound.network_base()],
                None => Vec::new(),
            };
            return AddressSpace::from_parts(self.family, networks, self.bound);
        }

        let summarized = summarize::summarize(&self.networks);
        let mut out = Vec::new();

        if let Some(bound) = &self.bound {
            let first = summarized[0].first_value();
            if bound.first_value() < first {
                out.extend(gaps::maximal_blocks(
                    self.family,
                    bound.first_value(),
                    first - 1,
                ));
            }
        }

        for (before, after) in summarized.iter().tuple_windows() {
            out.extend(gaps::between(before, after));
        }

        if let Some(bound) = &self.bound {
            let last = summarized[summarized.len() - 1].last_value();
            if last < bound.last_value() {
                out.extend(gaps::maximal_blocks(
                    self.family,
                    last + 1,
                    bound.last_value(),
                ));
            }
        }

        log::debug!(
            "found {} gaps across {} summarized networks",
            out.len(),
            summarized.len()
        );
        AddressSpace::from_parts(self.family, out, self.bound)
    }
}

impl<'a> IntoIterator for &'a AddressSpace {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.networks.iter()
    }
}
