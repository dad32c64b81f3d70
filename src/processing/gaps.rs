//! Covering value ranges with maximal CIDR blocks.
//!
//! The gap legs of [`AddressSpace::gaps`](crate::AddressSpace::gaps) — before
//! the first network, between consecutive networks, after the last — all
//! reduce to one primitive: tile an inclusive value range with the fewest
//! aligned blocks.

use crate::family::Family;
use crate::models::Address;

/// Cover the inclusive value range `[start, end]` with the fewest CIDR
/// blocks, widest first.
///
/// Each emitted block starts exactly at the running cursor; its prefix
/// length is bounded below by the cursor's alignment (a block can only be
/// as wide as the trailing zero bits of its base allow) and above by the
/// requirement not to pass `end`.
///
/// # Arguments
/// * `family` - address family of the produced blocks
/// * `start` - first value to cover
/// * `end` - last value to cover, inclusive; at most `family.max_int()`
pub fn maximal_blocks(family: Family, start: u128, end: u128) -> Vec<Address> {
    debug_assert!(end <= family.max_int());
    let mut blocks = Vec::new();
    if start > end {
        return blocks;
    }

    let mut cursor = start;
    loop {
        let prefix_len = widest_prefix_at(family, cursor, end);
        blocks.push(Address::new_unchecked(family, cursor, prefix_len));

        let block_last = cursor + family.hostmask(prefix_len);
        if block_last >= end {
            break;
        }
        cursor = block_last + 1;
    }
    blocks
}

/// The widest prefix for a block starting exactly at `cursor` that does not
/// extend past `end`.
fn widest_prefix_at(family: Family, cursor: u128, end: u128) -> u8 {
    let bits = family.bit_length();
    // Alignment floor: a wider block would start below the cursor.
    let trailing = cursor.trailing_zeros().min(u32::from(bits)) as u8;
    let mut prefix_len = bits - trailing;
    // Size ceiling: hostmask is the block size minus one.
    while family.hostmask(prefix_len) > end - cursor {
        prefix_len += 1;
    }
    prefix_len
}

/// Maximal blocks strictly between two disjoint networks of one family.
pub fn between(before: &Address, after: &Address) -> Vec<Address> {
    debug_assert_eq!(before.family(), after.family());
    if after.first_value() <= before.last_value() {
        return Vec::new();
    }
    maximal_blocks(
        before.family(),
        before.last_value() + 1,
        after.first_value() - 1,
    )
}
