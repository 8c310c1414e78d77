use tetra_core::{BitBuffer, SsiType, TdmaTime, TetraAddress};

const DEFRAG_BUF_INITIAL_BITS: usize = 512;

/// MAC defragmenter: one reassembly in flight, keyed by the SSI active
/// when fragmentation started. A reassembly that is still open when the
/// next one starts is discarded and logged; an append under a different
/// SSI stops the reassembly (23.4.3).
pub struct MacDefrag {
    address: TetraAddress,
    usage_marker: u8,
    start_time: TdmaTime,
    num_frags: usize,
    stopped: bool,
    sdu: BitBuffer,
}

impl MacDefrag {
    pub fn new() -> Self {
        Self {
            address: TetraAddress::new(0, SsiType::Unknown),
            usage_marker: 0,
            start_time: TdmaTime::default(),
            num_frags: 0,
            stopped: true,
            sdu: BitBuffer::growable(DEFRAG_BUF_INITIAL_BITS),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.stopped
    }

    /// Begin a new reassembly. Flushes and reports a previous one that
    /// never saw its MAC-END.
    pub fn start(&mut self, address: TetraAddress, usage_marker: u8, time: TdmaTime) {
        if !self.sdu.is_empty() {
            tracing::debug!(
                "defrag failed: {} incomplete fragments ({} bits) discarded for SSI {}",
                self.num_frags,
                self.sdu.len(),
                self.address.ssi
            );
        }

        self.address = address;
        self.usage_marker = usage_marker;
        self.start_time = time;
        self.num_frags = 0;
        self.sdu = BitBuffer::growable(DEFRAG_BUF_INITIAL_BITS);
        self.stopped = false;

        tracing::debug!("defrag start: SSI {} at {}", address.ssi, time);
    }

    /// Append the bits between `frag`'s cursor and window end.
    pub fn append(&mut self, frag: &mut BitBuffer, address: TetraAddress) {
        if self.stopped {
            tracing::debug!("defrag append failed: not reassembling (SSI {})", address.ssi);
            return;
        }
        if address.ssi != self.address.ssi {
            tracing::debug!(
                "defrag append failed: SSI {} while reassembling SSI {}",
                address.ssi,
                self.address.ssi
            );
            self.stop();
            return;
        }

        let frag_bits = frag.remaining();
        self.sdu.copy_from(frag, frag_bits);
        self.num_frags += 1;
        tracing::debug!(
            "defrag append: SSI {} fragment {} ({} bits, total {})",
            self.address.ssi,
            self.num_frags,
            frag_bits,
            self.sdu.len()
        );
    }

    /// Finish the reassembly and hand out the accumulated TM-SDU with the
    /// address and usage marker recorded at start. None when the
    /// reassembly was stopped along the way; the defragmenter is reset
    /// either way.
    pub fn take_sdu(&mut self) -> Option<(BitBuffer, TetraAddress, u8)> {
        if self.stopped {
            tracing::debug!(
                "defrag end failed: SSI {} fragment {} ({} bits)",
                self.address.ssi,
                self.num_frags,
                self.sdu.len()
            );
            return None;
        }

        let mut sdu = std::mem::replace(&mut self.sdu, BitBuffer::growable(DEFRAG_BUF_INITIAL_BITS));
        sdu.seek(0);
        let result = (sdu, self.address, self.usage_marker);
        self.stop();
        Some(result)
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.num_frags = 0;
        self.sdu = BitBuffer::growable(DEFRAG_BUF_INITIAL_BITS);
    }
}

impl Default for MacDefrag {
    fn default() -> Self {
        Self::new()
    }
}
