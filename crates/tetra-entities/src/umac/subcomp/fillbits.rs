//! Fill bit handling, Clause 23.4.3.2. A PDU announcing fill bits pads
//! its SDU to the octet boundary with a single 1 followed by zeroes; the
//! receiver strips from the tail up to and including that 1.

pub mod removal {
    use tetra_core::BitBuffer;

    /// Number of fill bits at the end of a PDU occupying `pdu_len_bits`
    /// of the window: the last 1 bit between the cursor and the PDU end,
    /// plus everything behind it. Zero (with a warning, unless
    /// suppressed) when the whole region is clear.
    pub fn get_num_fill_bits(bitbuf: &BitBuffer, pdu_len_bits: usize, suppress_warning: bool) -> usize {
        let mut fill_from = None;
        for offset in bitbuf.pos()..pdu_len_bits {
            if bitbuf.peek_bits_at(offset, 1) == Some(1) {
                fill_from = Some(offset);
            }
        }

        match fill_from {
            Some(offset) => pdu_len_bits - offset,
            None => {
                if !suppress_warning {
                    tracing::warn!("no fill bits found");
                }
                0
            }
        }
    }
}

pub mod addition {
    use tetra_core::BitBuffer;

    /// Fill bits needed to reach the next octet boundary (0..7).
    #[inline(always)]
    pub fn compute_required(total_pdu_len_bits: usize) -> usize {
        (8 - total_pdu_len_bits % 8) % 8
    }

    /// Write `num_fill_bits` fill bits at the cursor: a 1 then zeroes.
    pub fn write(bitbuf: &mut BitBuffer, num_fill_bits: usize) {
        if num_fill_bits > 0 {
            bitbuf.write_bit(1);
            bitbuf.write_zeroes(num_fill_bits - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::BitBuffer;

    #[test]
    fn test_removal_matches_addition() {
        // payloads survive an append/strip round trip; stripping only
        // happens when fill bits were announced (fill > 0)
        for payload in ["1", "01", "10011", "1010101", "110101"] {
            let fill = addition::compute_required(payload.len());
            assert!(fill > 0);
            let mut buf = BitBuffer::growable(16);
            for c in payload.chars() {
                buf.write_bit(if c == '1' { 1 } else { 0 });
            }
            addition::write(&mut buf, fill);
            assert_eq!(buf.len() % 8, 0);

            buf.seek(0);
            let stripped = removal::get_num_fill_bits(&buf, buf.len(), true);
            assert_eq!(stripped, fill);
            assert_eq!(&buf.to_bitstr()[..buf.len() - stripped], payload);
        }
    }

    #[test]
    fn test_single_trailing_one_is_one_fill_bit() {
        // last bit 1: only that bit is removed
        let buf = BitBuffer::from_bitstr("10100001");
        assert_eq!(removal::get_num_fill_bits(&buf, 8, false), 1);
    }

    #[test]
    fn test_trailing_zeroes_strip_back_to_one() {
        let buf = BitBuffer::from_bitstr("10110000");
        assert_eq!(removal::get_num_fill_bits(&buf, 8, false), 5);
    }

    #[test]
    fn test_no_fill_bits_found() {
        let buf = BitBuffer::from_bitstr("00000000");
        assert_eq!(removal::get_num_fill_bits(&buf, 8, true), 0);
    }

    #[test]
    fn test_scan_starts_at_the_cursor() {
        // ones before the cursor belong to the header, not the fill
        let mut buf = BitBuffer::from_bitstr("11110000");
        buf.seek(4);
        assert_eq!(removal::get_num_fill_bits(&buf, 8, true), 0);
    }
}
