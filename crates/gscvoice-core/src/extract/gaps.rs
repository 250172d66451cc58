//! Unused identifier inference.

/// Returns every identifier strictly between two adjacent entries of `sorted`.
///
/// Values below the first or above the last entry are outside the known
/// range and never reported.
pub fn unused_ids(sorted: &[u16]) -> Vec<u16> {
    sorted
        .windows(2)
        .flat_map(|pair| (pair[0].saturating_add(1))..pair[1])
        .collect()
}
