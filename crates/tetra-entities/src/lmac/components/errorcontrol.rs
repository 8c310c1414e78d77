//! Channel decoding between type 5 (received) and type 1 (MAC) bits,
//! Clause 8. The encode direction is kept for the test suite, which
//! builds complete downlink blocks and bursts.

use tetra_core::BitBuffer;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use super::convenc::{self, ConvEncState, ERASURE};
use super::errorcontrol_params::get_params;
use super::{crc16, interleaver, rm3014, scrambler, viterbi};

const MAX_TYPE2_BITS: usize = 288;
const MAX_TYPE345_BITS: usize = 432;
const MAX_MOTHER_BITS: usize = MAX_TYPE2_BITS * 4;

/// Decodes a control-plane block from type 5 to type 1 bits:
/// descramble, deinterleave, depuncture, Viterbi, CRC.
/// Returns the truncated type-1 bits and the CRC verdict; the caller
/// decides what a failed CRC means for the channel at hand.
pub fn decode_cp(lchan: LogicalChannel, block: BitBuffer, scrambling_code: u32) -> (BitBuffer, bool) {
    assert!(lchan.is_control_channel() && lchan != LogicalChannel::Aach);

    let params = get_params(lchan);
    assert!(
        block.remaining() == params.type345_bits,
        "decode_cp: {:?} block has {} bits, expected {}",
        lchan,
        block.remaining(),
        params.type345_bits
    );
    tracing::trace!("decode_cp {:?} type5: {}", lchan, block.dump_bin());

    // descrambling, type5 -> type4
    let mut type4_arr = [0u8; MAX_TYPE345_BITS];
    block.to_bits(&mut type4_arr[..params.type345_bits]);
    scrambler::scramble_bits(scrambling_code, &mut type4_arr[..params.type345_bits]);

    // de-interleaving, type4 -> type3
    let mut type3_arr = [0u8; MAX_TYPE345_BITS];
    interleaver::block_deinterleave(params.type345_bits, params.interleave_a, &type4_arr, &mut type3_arr);

    // de-puncturing, type3 -> mother bits with erasures
    let mut mother_arr = [ERASURE; MAX_MOTHER_BITS];
    convenc::depunct23(&type3_arr, params.type345_bits, &mut mother_arr);

    // Viterbi, mother bits -> type2
    let mut type2_arr = [0u8; MAX_TYPE2_BITS];
    viterbi::decode_hard(&mother_arr, &mut type2_arr[..params.type2_bits]);

    // CRC check over type1 bits plus the 16 CRC bits
    let crc_ok = crc16::check_crc16_ccitt(&type2_arr, params.type1_bits + 16);

    let type1 = BitBuffer::from_bits(&type2_arr[..params.type1_bits]);
    tracing::trace!(
        "decode_cp {:?} crc {} type1: {}",
        lchan,
        if crc_ok { "ok" } else { "WRONG" },
        type1.dump_bin()
    );
    (type1, crc_ok)
}

/// Encodes a control-plane block from type 1 to type 5 bits.
pub fn encode_cp(lchan: LogicalChannel, type1: BitBuffer, scrambling_code: u32) -> BitBuffer {
    assert!(lchan.is_control_channel() && lchan != LogicalChannel::Aach);

    let params = get_params(lchan);
    let mut type1 = type1;
    type1.seek(0);
    assert!(
        type1.len() == params.type1_bits,
        "encode_cp: {:?} type1 has {} bits, expected {}",
        lchan,
        type1.len(),
        params.type1_bits
    );

    // CRC addition, type1 -> type2 (tail bits stay zero)
    let mut type2_arr = [0u8; MAX_TYPE2_BITS];
    type1.to_bits(&mut type2_arr[..params.type1_bits]);
    let crc = crc16::crc16_ccitt_compute(&type2_arr, params.type1_bits);
    for i in 0..16 {
        type2_arr[params.type1_bits + i] = ((crc >> (15 - i)) & 1) as u8;
    }

    // mother code, type2 -> type3 via puncturing
    let mut mother_arr = [0u8; MAX_MOTHER_BITS];
    let mut enc = ConvEncState::new();
    enc.encode(&type2_arr[..params.type2_bits], &mut mother_arr);
    let mut type3_arr = [0u8; MAX_TYPE345_BITS];
    convenc::punct23(&mother_arr, &mut type3_arr[..params.type345_bits]);

    // interleaving, type3 -> type4
    let mut type4_arr = [0u8; MAX_TYPE345_BITS];
    interleaver::block_interleave(params.type345_bits, params.interleave_a, &type3_arr, &mut type4_arr);

    // scrambling, type4 -> type5
    scrambler::scramble_bits(scrambling_code, &mut type4_arr[..params.type345_bits]);
    BitBuffer::from_bits(&type4_arr[..params.type345_bits])
}

/// Decodes the AACH broadcast block: descramble and Reed-Muller correct.
/// Returns the 14 type-1 bits.
pub fn decode_aach(block: BitBuffer, scrambling_code: u32) -> BitBuffer {
    assert!(block.remaining() == 30);

    let mut bits = [0u8; 30];
    block.to_bits(&mut bits);
    scrambler::scramble_bits(scrambling_code, &mut bits);

    let codeword = bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32);
    let data = rm3014::rm3014_decode(codeword);

    let mut type1 = BitBuffer::new(14);
    type1.write_bits(data as u64, 14);
    type1.seek(0);
    type1
}

/// Encodes 14 AACH bits into the scrambled 30-bit broadcast block.
pub fn encode_aach(type1: BitBuffer, scrambling_code: u32) -> BitBuffer {
    let mut type1 = type1;
    type1.seek(0);
    assert!(type1.remaining() == 14);

    let codeword = rm3014::rm3014_encode(type1.read_bits(14).unwrap() as u16);
    let mut bits = [0u8; 30];
    for (i, slot) in bits.iter_mut().enumerate() {
        *slot = ((codeword >> (29 - i)) & 1) as u8;
    }
    scrambler::scramble_bits(scrambling_code, &mut bits);
    BitBuffer::from_bits(&bits)
}

/// Traffic passthrough: a TCH/S slot is only descrambled; speech FEC is
/// the U-plane codec's business.
pub fn descramble_traffic(block: BitBuffer, scrambling_code: u32) -> BitBuffer {
    let mut bits = vec![0u8; block.remaining()];
    block.to_bits(&mut bits);
    scrambler::scramble_bits(scrambling_code, &mut bits);
    BitBuffer::from_bits(&bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::cell;

    /// SCH/HD, STCH, BNCH encoding and decoding
    #[test]
    fn test_encdec_bnch() {
        let type1vec = "1000001111101001010000000000101001101110011000000000000000001010000101010100000000000000000000101111111111111111110100100000";
        let type5vec = "001101111110011111000110100001101110011100110000111100011000011100101011111100010101101001101001001110011100001010001101101010100000000011010001001101001010101100100110011001111100001011000001010010000011010110110110";
        let scramb_code = cell::scrambling_word(204, 1337, 1);

        let type5 = encode_cp(LogicalChannel::Bnch, BitBuffer::from_bitstr(type1vec), scramb_code);
        assert_eq!(type5vec, type5.to_bitstr());

        let (type1, crc_ok) = decode_cp(LogicalChannel::Bnch, type5, scramb_code);
        assert!(crc_ok);
        assert_eq!(type1vec, type1.to_bitstr());
    }

    /// BSCH encoding and decoding with the predefined scrambling code
    #[test]
    fn test_encdec_bsch() {
        let type1vec = "000100000111000010000010000000000110011000001010011100110001";
        let scramb_code = cell::SCRAMB_INIT;

        let type5 = encode_cp(LogicalChannel::Bsch, BitBuffer::from_bitstr(type1vec), scramb_code);
        let (type1, crc_ok) = decode_cp(LogicalChannel::Bsch, type5, scramb_code);
        assert!(crc_ok);
        assert_eq!(type1vec, type1.to_bitstr());
    }

    /// AACH encoding and decoding
    #[test]
    fn test_encdec_aach() {
        let scramb_code = cell::scrambling_word(204, 1337, 1);
        let type5vec = "100100100001011110111010111011";
        let type1vec = "00001010001010";

        let type1 = decode_aach(BitBuffer::from_bitstr(type5vec), scramb_code);
        let type5 = encode_aach(BitBuffer::from_bitstr(type1vec), scramb_code);

        assert_eq!(type5vec, type5.to_bitstr());
        assert_eq!(type1vec, type1.to_bitstr());
    }

    /// SCH/F encoding and decoding
    #[test]
    fn test_encdec_sch_f() {
        let type1vec = "0000000000110001000000000010011100010001000001110010000010000001000000000010011100010001010000000000001000110110011011100000100110000001011100000000110101000110011100000100000000000000000100001000000000000000000000000000000000000000000000000000000000000000000000000000";
        let scramb_code = cell::scrambling_word(204, 1337, 1);

        let type5 = encode_cp(LogicalChannel::SchF, BitBuffer::from_bitstr(type1vec), scramb_code);
        let (type1, crc_ok) = decode_cp(LogicalChannel::SchF, type5, scramb_code);
        assert!(crc_ok);
        assert_eq!(type1vec, type1.to_bitstr());
    }

    /// A corrupted block must fail the CRC but still decode the rest
    #[test]
    fn test_bit_errors_fail_crc() {
        let type1vec = "000100000111000010000010000000000110011000001010011100110001";
        let scramb_code = cell::SCRAMB_INIT;
        let type5 = encode_cp(LogicalChannel::Bsch, BitBuffer::from_bitstr(type1vec), scramb_code);

        // flip a comfortable number of spread-out bits; more than the
        // punctured rate-2/3 code can repair
        let mut bits = type5.to_bitstr().into_bytes();
        for i in (0..bits.len()).step_by(7) {
            bits[i] ^= 1;
        }
        let garbled: String = bits.iter().map(|&b| b as char).collect();
        let (_type1, crc_ok) = decode_cp(LogicalChannel::Bsch, BitBuffer::from_bitstr(&garbled), scramb_code);
        assert!(!crc_ok);
    }

    /// Traffic slots bypass the FEC chain and are only descrambled
    #[test]
    fn test_descramble_traffic_roundtrip() {
        let original: String = (0..432).map(|i| if (i * 11) % 3 == 0 { '1' } else { '0' }).collect();
        let scramb_code = cell::scrambling_word(204, 1337, 1);
        let scrambled = descramble_traffic(BitBuffer::from_bitstr(&original), scramb_code);
        assert_ne!(scrambled.to_bitstr(), original);
        let recovered = descramble_traffic(scrambled, scramb_code);
        assert_eq!(recovered.to_bitstr(), original);
    }
}
