//! Greedy summarization of sorted network lists.

use crate::models::Address;

/// Merge a sorted sequence of networks into the fewest covering blocks
/// reachable by a single greedy pass.
///
/// Folds left to right: each incoming network is first offered to the last
/// output entry via [`Address::summarize_with`]; on a merge the trailing
/// entries are re-merged until no further summary applies (a merge can make
/// the new tail adjacent to the entry before it), otherwise the network is
/// appended as-is.
///
/// # Arguments
/// * `networks` - networks sorted by the `Address` ordering
///
/// # Returns
/// Non-overlapping covering networks, still sorted.
pub fn summarize(networks: &[Address]) -> Vec<Address> {
    let mut out: Vec<Address> = Vec::with_capacity(networks.len());
    for network in networks {
        match out.last().and_then(|last| network.summarize_with(last)) {
            Some(summary) => {
                let tail = out.len() - 1;
                out[tail] = summary;
                backtrack(&mut out);
            }
            None => out.push(*network),
        }
    }
    out
}

/// Re-merge the trailing pair until it no longer summarizes.
fn backtrack(out: &mut Vec<Address>) {
    while out.len() >= 2 {
        let summary = match out[out.len() - 1].summarize_with(&out[out.len() - 2]) {
            Some(summary) => summary,
            None => break,
        };
        out.truncate(out.len() - 2);
        out.push(summary);
    }
}
