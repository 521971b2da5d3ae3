use xxhash_rust::xxh3::xxh3_64_with_seed;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Deterministic permutation of `0..n`.
///
/// Random-bar and dissolve wipes reveal cells in this order; the same `seed` always yields the
/// same order so rewinds and replays match.
pub(crate) fn seeded_permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut keyed: Vec<(u64, usize)> = (0..n)
        .map(|i| (xxh3_64_with_seed(&(i as u64).to_le_bytes(), seed), i))
        .collect();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
