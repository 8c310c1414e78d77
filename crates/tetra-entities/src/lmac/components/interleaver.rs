//! Block interleaving between type 3 and type 4 bits, Clause 8.2.4.
//!
//! Over a block of K bits, bit i lands at position a·(i+1) mod K
//! (0-based; the standard writes the same mapping 1-based). Since
//! gcd(a, K) = 1 for every parameter set in use, this is a permutation.

pub fn block_interleave(k: usize, a: usize, input: &[u8], output: &mut [u8]) {
    assert!(input.len() >= k && output.len() >= k);
    for (i, &bit) in input[..k].iter().enumerate() {
        output[a * (i + 1) % k] = bit;
    }
}

pub fn block_deinterleave(k: usize, a: usize, input: &[u8], output: &mut [u8]) {
    assert!(input.len() >= k && output.len() >= k);
    for (i, slot) in output[..k].iter_mut().enumerate() {
        *slot = input[a * (i + 1) % k];
    }
}
