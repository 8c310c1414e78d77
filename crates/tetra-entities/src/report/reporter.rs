use std::net::UdpSocket;

use serde::Serialize;
use tetra_config::SharedConfig;
use tetra_core::{BitBuffer, TetraEntity};
use tetra_saps::{SapMsg, SapMsgInner};

use crate::{MessageQueue, TetraEntityTrait};

/// One JSON datagram per decoded TM-SDU.
#[derive(Serialize)]
struct TmSduReport {
    service: &'static str,
    channel: String,
    tn: u8,
    #[serde(rename = "fn")]
    frame: u8,
    mn: u8,
    address_type: String,
    ssi: u32,
    usage_marker: u8,
    encryption_mode: u8,
    len_bits: usize,
    bits: String,
}

/// Upper-layer sink: serializes every (logical channel, TM-SDU, address,
/// time) tuple as JSON and sends it as a UDP datagram to the interpreter.
pub struct Reporter {
    config: SharedConfig,
    socket: Option<UdpSocket>,
}

impl Reporter {
    pub fn new(config: SharedConfig) -> Self {
        let tx_port = config.config().tx_port;
        let socket = match UdpSocket::bind("127.0.0.1:0")
            .and_then(|s| s.connect(("127.0.0.1", tx_port)).map(|_| s))
        {
            Ok(s) => {
                tracing::info!("reporting to udp 127.0.0.1:{}", tx_port);
                Some(s)
            }
            Err(e) => {
                tracing::warn!("report socket unavailable, reports are dropped: {}", e);
                None
            }
        };
        Self { config, socket }
    }

    fn send_json(&self, report: &TmSduReport) {
        let Some(socket) = &self.socket else {
            return;
        };
        match serde_json::to_string(report) {
            Ok(json) => {
                if let Err(e) = socket.send(json.as_bytes()) {
                    tracing::warn!("report send failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("report serialization failed: {}", e),
        }
    }

    /// Window bits as an uppercase hex string, last nibble zero-padded.
    fn bits_to_hex(pdu: &BitBuffer) -> String {
        let len = pdu.len();
        let mut s = String::with_capacity(len.div_ceil(4));
        let mut offset = 0;
        while offset < len {
            let take = usize::min(4, len - offset);
            let nibble = pdu.peek_bits_at(offset, take).unwrap() as u8;
            let digit = if take < 4 { nibble << (4 - take) } else { nibble };
            s.push_str(&format!("{:X}", digit));
            offset += take;
        }
        s
    }
}

impl TetraEntityTrait for Reporter {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Report
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        let dltime = message.dltime;
        let report = match &message.msg {
            SapMsgInner::TmaUnitdataInd(prim) => TmSduReport {
                service: "MAC",
                channel: prim.logical_channel.to_string(),
                tn: dltime.t,
                frame: dltime.f,
                mn: dltime.m,
                address_type: prim.main_address.ssi_type.to_string(),
                ssi: prim.main_address.ssi,
                usage_marker: prim.usage_marker,
                encryption_mode: prim.encryption_mode,
                len_bits: prim.pdu.len(),
                bits: Self::bits_to_hex(&prim.pdu),
            },
            SapMsgInner::TmdCircuitDataInd(prim) => TmSduReport {
                service: "UPLANE",
                channel: prim.logical_channel.to_string(),
                tn: dltime.t,
                frame: dltime.f,
                mn: dltime.m,
                address_type: String::new(),
                ssi: 0,
                usage_marker: prim.usage_marker,
                encryption_mode: prim.encryption_mode,
                len_bits: prim.block.len(),
                bits: Self::bits_to_hex(&prim.block),
            },
            _ => {
                tracing::warn!("Reporter: unexpected message on {:?}", message.sap);
                return;
            }
        };
        tracing::debug!(
            "report {} {} {} bits",
            report.channel,
            dltime,
            report.len_bits
        );
        self.send_json(&report);
    }
}
