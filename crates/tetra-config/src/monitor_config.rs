use std::sync::Arc;

/// Immutable monitor configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// UDP port receiving demodulated bits from the PHY (one byte per bit)
    pub rx_port: u16,
    /// UDP port the JSON reports are sent to
    pub tx_port: u16,
    /// Replay the input bit stream from this file instead of UDP
    pub input_file: Option<String>,
    /// Mirror the raw input byte stream to this file
    pub mirror_file: Option<String>,
    /// Input bytes carry 8 bits each, LSB first
    pub packed_input: bool,
    /// Strip MAC fill bits (23.4.3.2); cleared by the keep-fill-bits switch
    pub remove_fill_bits: bool,
    /// Debug level 0..4, mapped onto tracing filters
    pub debug_level: u8,
    /// Verbose logfile path
    pub debug_log: Option<String>,
    /// Wire-capture emitter requested (handled outside this repository)
    pub wire_capture: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            rx_port: 42000,
            tx_port: 42100,
            input_file: None,
            mirror_file: None,
            packed_input: false,
            remove_fill_bits: true,
            debug_level: 1,
            debug_log: None,
            wire_capture: false,
        }
    }
}

/// Shared handle to the configuration. Entities keep a clone and read from
/// it; nothing in the pipeline path takes a lock.
#[derive(Clone)]
pub struct SharedConfig {
    cfg: Arc<MonitorConfig>,
}

impl SharedConfig {
    pub fn from_config(cfg: MonitorConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }

    /// Access the immutable config.
    pub fn config(&self) -> Arc<MonitorConfig> {
        Arc::clone(&self.cfg)
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::from_config(MonitorConfig::default())
    }
}
