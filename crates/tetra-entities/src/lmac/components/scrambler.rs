//! Scrambling between type 4 and type 5 bits, Clause 8.2.5.
//!
//! The sequence generator is a 32-stage Fibonacci LFSR. Rather than
//! XOR-ing shifted copies of the state, one output bit is the parity of
//! the state under a fixed tap mask; the state then shifts down with the
//! fresh bit re-entering at the top. The 32-bit initialization word comes
//! from the cell identity (`tetra_core::cell::scrambling_word`).

/// Taps of the scrambling sequence generator: state bits
/// 0, 6, 9, 10, 16, 20, 21, 22, 24, 25, 27, 28, 30 and 31
/// (i.e. registers 32, 26, 23, 22, 16, 12, 11, 10, 8, 7, 5, 4, 2, 1 of
/// Clause 8.2.5.2).
const TAP_MASK: u32 = 0xDB71_0641;

/// Sequence generator state. Yields one scrambling bit per step.
struct Lfsr(u32);

impl Lfsr {
    fn step(&mut self) -> u8 {
        let bit = (self.0 & TAP_MASK).count_ones() & 1;
        self.0 = (self.0 >> 1) | (bit << 31);
        bit as u8
    }
}

/// Scramble or unscramble in place: XOR the scrambling sequence for the
/// given code into a bit-per-byte slice. The operation is its own
/// inverse.
pub fn scramble_bits(code: u32, bits: &mut [u8]) {
    let mut lfsr = Lfsr(code);
    for bit in bits.iter_mut() {
        *bit ^= lfsr.step();
    }
}
