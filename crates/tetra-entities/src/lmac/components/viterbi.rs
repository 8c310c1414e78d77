//! Viterbi decoder for the 16-state rate-1/4 RCPC mother code
//! (Clause 8.2.3.1). Hard-decision decoding over received bits with
//! erasure marks from depuncturing: erased positions simply contribute
//! nothing to the branch cost.

use super::convenc::ERASURE;

/// Constraint length of the mother code.
const K: usize = 5;
const NUM_STATES: usize = 1 << (K - 1);

/// Path metric for a state no valid encoder run can be in (yet).
const UNREACHED: i32 = i32::MAX / 2;

/// Trellis decoder for the TETRA mother code. A state is the encoder
/// register contents, newest bit in the MSB; consuming input `u` in state
/// `s` leads to state `u<<3 | s>>1`.
pub struct TetraViterbiDecoder {
    /// Mother-code output for every (state, input) pair,
    /// indexed `state << 1 | input`
    outputs: [[u8; 4]; 2 * NUM_STATES],
}

impl TetraViterbiDecoder {
    pub fn new() -> Self {
        // generator polynomials of Clause 8.2.3.1.1:
        //   G1 = 1 + D + D^4          G2 = 1 + D^2 + D^3 + D^4
        //   G3 = 1 + D + D^2 + D^4    G4 = 1 + D + D^3 + D^4
        let mut outputs = [[0u8; 4]; 2 * NUM_STATES];
        for state in 0..NUM_STATES as u8 {
            let d1 = (state >> 3) & 1;
            let d2 = (state >> 2) & 1;
            let d3 = (state >> 1) & 1;
            let d4 = state & 1;
            for input in 0..2u8 {
                outputs[((state as usize) << 1) | input as usize] = [
                    input ^ d1 ^ d4,
                    input ^ d2 ^ d3 ^ d4,
                    input ^ d1 ^ d2 ^ d4,
                    input ^ d1 ^ d3 ^ d4,
                ];
            }
        }
        Self { outputs }
    }

    /// Mismatches between a received 4-bit symbol group and the expected
    /// output of one branch, ignoring erased positions.
    #[inline]
    fn branch_cost(&self, state: usize, input: u8, symbols: &[u8]) -> i32 {
        let expected = &self.outputs[(state << 1) | input as usize];
        let mut cost = 0;
        for (&rx, &ex) in symbols.iter().zip(expected.iter()) {
            if rx != ERASURE && rx != ex {
                cost += 1;
            }
        }
        cost
    }

    /// Decode `received.len() / 4` bits. The encoder starts in state 0
    /// and its tail bits return it there, so traceback starts at state 0.
    pub fn decode(&self, received: &[u8]) -> Vec<u8> {
        let steps = received.len() / 4;

        let mut metrics = [UNREACHED; NUM_STATES];
        metrics[0] = 0;
        // one predecessor-state column per trellis step
        let mut survivors: Vec<[u8; NUM_STATES]> = Vec::with_capacity(steps);

        for symbols in received.chunks_exact(4) {
            let mut next = [UNREACHED; NUM_STATES];
            let mut pred = [0u8; NUM_STATES];

            for (next_state, slot) in next.iter_mut().enumerate() {
                // the input that enters next_state, and the two states it
                // can be entered from
                let input = (next_state >> (K - 2)) as u8;
                let from_even = (next_state << 1) & (NUM_STATES - 1);
                for from in [from_even, from_even | 1] {
                    if metrics[from] == UNREACHED {
                        continue;
                    }
                    let cost = metrics[from] + self.branch_cost(from, input, symbols);
                    if cost < *slot {
                        *slot = cost;
                        pred[next_state] = from as u8;
                    }
                }
            }

            metrics = next;
            survivors.push(pred);
        }

        let mut decoded = vec![0u8; steps];
        let mut state = 0usize;
        for (bit, pred) in decoded.iter_mut().zip(survivors.iter()).rev() {
            *bit = (state >> (K - 2)) as u8 & 1;
            state = pred[state] as usize;
        }
        decoded
    }
}

impl Default for TetraViterbiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode `out.len()` bits out of `4 * out.len()` received bits, one per
/// byte: 0x00, 0x01 or `ERASURE`.
pub fn decode_hard(received: &[u8], out: &mut [u8]) {
    assert!(received.len() >= out.len() * 4, "decode_hard: input too short");
    debug_assert!(
        received[..out.len() * 4].iter().all(|&b| b <= 1 || b == ERASURE),
        "decode_hard: input is not bits with erasure marks"
    );

    let decoder = TetraViterbiDecoder::new();
    let decoded = decoder.decode(&received[..out.len() * 4]);
    out.copy_from_slice(&decoded);
}

#[cfg(test)]
mod tests {
    use super::super::convenc::{self, ConvEncState};
    use super::*;

    fn random_message(info_bits: usize) -> Vec<u8> {
        // tail bits flush the encoder back to state 0
        (0..info_bits).map(|_| rand::random_range(0..2)).chain([0; 4]).collect()
    }

    fn encode(message: &[u8]) -> Vec<u8> {
        let mut encoder = ConvEncState::new();
        let mut encoded = vec![0u8; message.len() * 4];
        encoder.encode(message, &mut encoded);
        encoded
    }

    #[test]
    fn test_decode_clean_encoder_output() {
        for info_bits in [12, 76, 140, 280] {
            let message = random_message(info_bits);
            let decoded = TetraViterbiDecoder::new().decode(&encode(&message));
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn test_erased_positions_are_recovered() {
        // erase two of every four mother bits; the survivors still pin
        // down the message
        let message = random_message(140);
        let mut received = encode(&message);
        for (i, slot) in received.iter_mut().enumerate() {
            if i % 4 >= 2 {
                *slot = ERASURE;
            }
        }
        let decoded = TetraViterbiDecoder::new().decode(&received);
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_decode_after_rate23_depuncture() {
        // the real receive path: encode, puncture 2/3, depuncture, decode
        for (type2_bits, punctured_bits) in [(80usize, 120usize), (144, 216), (288, 432)] {
            let message = random_message(type2_bits - 4);
            let mother = encode(&message);

            let mut punctured = vec![0u8; punctured_bits];
            convenc::punct23(&mother, &mut punctured);

            let mut received = vec![ERASURE; type2_bits * 4];
            convenc::depunct23(&punctured, punctured_bits, &mut received);

            let mut decoded = vec![0u8; type2_bits];
            decode_hard(&received, &mut decoded);
            assert_eq!(decoded, message, "type2 {}", type2_bits);
        }
    }

    #[test]
    fn test_single_bit_error_is_corrected() {
        let message = random_message(60);
        let mut received = encode(&message);
        received[97] ^= 1;
        let decoded = TetraViterbiDecoder::new().decode(&received);
        assert_eq!(decoded, message);
    }
}
