use std::net::UdpSocket;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;

use tetra_config::{MonitorConfig, SharedConfig};
use tetra_core::debug;
use tetra_entities::MessageRouter;
use tetra_entities::lmac::lmac_mon::LmacMon;
use tetra_entities::phy::components::phy_io_file::{FileWriteMsg, PhyIoError, PhyIoFile, PhyIoFileMode};
use tetra_entities::phy::phy_mon::PhyMon;
use tetra_entities::report::reporter::Reporter;
use tetra_entities::umac::umac_mon::UmacMon;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "TETRA downlink monitor",
    long_about = "Decodes a continuous π/4-DQPSK TETRA downlink from demodulated \
                  hard bits (UDP or file) down to MAC TM-SDUs, reported as JSON over UDP"
)]
struct Args {
    /// UDP port receiving bits from the demodulator
    #[arg(short = 'r', default_value_t = 42000)]
    rx_port: u16,

    /// UDP port the JSON reports are sent to
    #[arg(short = 't', default_value_t = 42100)]
    tx_port: u16,

    /// Replay the input bit stream from a file instead of UDP
    #[arg(short = 'i')]
    input_file: Option<String>,

    /// Mirror the raw input byte stream to a file (replayable with -i)
    #[arg(short = 'o')]
    output_file: Option<String>,

    /// Packed input: one byte carries 8 bits, LSB first
    #[arg(short = 'P')]
    packed: bool,

    /// Keep MAC fill bits
    #[arg(short = 'f')]
    keep_fill_bits: bool,

    /// Debug level 0..4
    #[arg(short = 'd', default_value_t = 1)]
    debug_level: u8,

    /// Enable the wire-capture emitter
    #[arg(short = 'w')]
    wire_capture: bool,

    /// Verbose logfile
    #[arg(long = "log-file")]
    log_file: Option<String>,
}

/// Feed one received byte (or eight packed bits) into the pipeline.
fn rx_byte(phy: &mut PhyMon, router: &mut MessageRouter, byte: u8, packed: bool) {
    if packed {
        for idx in 0..8 {
            phy.rx_symbol(router.queue_mut(), (byte >> idx) & 1);
            router.deliver_all_messages();
        }
    } else {
        phy.rx_symbol(router.queue_mut(), byte & 1);
        router.deliver_all_messages();
    }
}

fn main() {
    let args = Args::parse();

    let cfg = MonitorConfig {
        rx_port: args.rx_port,
        tx_port: args.tx_port,
        input_file: args.input_file.clone(),
        mirror_file: args.output_file.clone(),
        packed_input: args.packed,
        remove_fill_bits: !args.keep_fill_bits,
        debug_level: args.debug_level,
        debug_log: args.log_file.clone(),
        wire_capture: args.wire_capture,
    };
    let shared = SharedConfig::from_config(cfg);

    let _log_guard = debug::setup_logging_default(args.debug_level, args.log_file.clone());

    eprintln!("TETRA downlink monitor {}", tetra_core::MONITOR_VERSION);
    if args.wire_capture {
        tracing::warn!("wire-capture emitter is not part of this build, -w ignored");
    }

    // Ctrl-C requests a clean stop; the current burst finishes
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("failed to set Ctrl+C handler");

    // mirror writer, fed with every received chunk
    let mirror = match &args.output_file {
        Some(path) => match PhyIoFile::create_async_writer(path, "phy-io-mirror".to_string()) {
            Ok(sender) => Some(sender),
            Err(e) => {
                eprintln!("Couldn't open mirror file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    // assemble the stack
    let mut router = MessageRouter::new();
    router.register_entity(Box::new(LmacMon::new(shared.clone())));
    router.register_entity(Box::new(UmacMon::new(shared.clone())));
    router.register_entity(Box::new(Reporter::new(shared.clone())));
    let mut phy = PhyMon::new(shared.clone());

    let mut rx_buf = [0u8; 1024];
    let exit_code;

    if let Some(path) = &args.input_file {
        // file replay
        let mut input = match PhyIoFile::new(path, PhyIoFileMode::Read) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Couldn't open input bits file {}: {}", path, e);
                std::process::exit(1);
            }
        };
        tracing::info!("replaying input from {}", path);

        loop {
            if !running.load(Ordering::SeqCst) {
                exit_code = 0;
                break;
            }
            match input.read_chunk(&mut rx_buf) {
                Ok(n) => {
                    if let Some(mirror) = &mirror {
                        let _ = mirror.send(FileWriteMsg::WriteBlock(rx_buf[..n].to_vec()));
                    }
                    for &byte in &rx_buf[..n] {
                        rx_byte(&mut phy, &mut router, byte, args.packed);
                    }
                }
                Err(PhyIoError::Eof) => {
                    tracing::info!("input file drained");
                    exit_code = 0;
                    break;
                }
                Err(e) => {
                    tracing::error!("read error: {:?}", e);
                    exit_code = 1;
                    break;
                }
            }
        }
    } else {
        // live input from the demodulator
        let socket = match UdpSocket::bind(("127.0.0.1", args.rx_port)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Couldn't create input socket on port {}: {}", args.rx_port, e);
                std::process::exit(1);
            }
        };
        // a finite timeout keeps the Ctrl-C flag observable
        socket
            .set_read_timeout(Some(Duration::from_secs(1)))
            .expect("failed to set socket timeout");
        tracing::info!("input socket on udp 127.0.0.1:{}", args.rx_port);

        loop {
            if !running.load(Ordering::SeqCst) {
                exit_code = 0;
                break;
            }
            match socket.recv(&mut rx_buf) {
                Ok(n) => {
                    if let Some(mirror) = &mirror {
                        let _ = mirror.send(FileWriteMsg::WriteBlock(rx_buf[..n].to_vec()));
                    }
                    for &byte in &rx_buf[..n] {
                        rx_byte(&mut phy, &mut router, byte, args.packed);
                    }
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut
                        || e.kind() == std::io::ErrorKind::Interrupted =>
                {
                    continue;
                }
                Err(e) => {
                    tracing::error!("read error: {}", e);
                    exit_code = 1;
                    break;
                }
            }
        }
    }

    if let Some(mirror) = &mirror {
        let _ = mirror.send(FileWriteMsg::Shutdown);
    }

    tracing::info!(
        "clean exit: {} bursts processed, {} matched",
        phy.bursts_processed(),
        phy.bursts_matched()
    );
    std::process::exit(exit_code);
}
