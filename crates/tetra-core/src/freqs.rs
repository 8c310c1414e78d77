/// Downlink carrier frequency helpers (SYSINFO fields, Clause 21.4.4.1).

/// Offset index from SYSINFO to Hz: (0, +6.25, -6.25, +12.5 kHz).
pub fn freq_offset_hz(offset_index: u8) -> i64 {
    match offset_index & 0b11 {
        0 => 0,
        1 => 6250,
        2 => -6250,
        _ => 12500,
    }
}

/// Downlink frequency: band in 100 MHz steps, carrier in 25 kHz steps,
/// plus the offset selected by the 2-bit index.
pub fn dl_freq_hz(freq_band: u8, main_carrier: u16, offset_index: u8) -> i64 {
    freq_band as i64 * 100_000_000 + main_carrier as i64 * 25_000 + freq_offset_hz(offset_index)
}
