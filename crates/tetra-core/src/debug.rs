use std::fs::OpenOptions;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tracingfmt};

/// Logs a warning for a code path that exists but is not implemented.
#[macro_export]
macro_rules! unimplemented_log {
    ( $($arg:tt)* ) => {{
        tracing::warn!("unimplemented: {}", format_args!($($arg)*));
    }};
}

/// If `cond` is false, logs a warning with the given message.
/// For received-data oddities that must not take the pipeline down.
#[macro_export]
macro_rules! assert_warn {
    ($cond:expr, $($arg:tt)+) => {{
        if !$cond {
            tracing::warn!(
                "assertion warning: `{}` failed: {} at {}:{}",
                stringify!($cond),
                format_args!($($arg)+),
                file!(),
                line!(),
            );
        }
    }};
}

static INIT_LOG: Once = Once::new();

/// Filter for a numeric debug level (the `-d` switch, 0..4).
fn filter_for_level(level: u8) -> EnvFilter {
    let directive = match level {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(directive)
}

/// Maximum verbosity to stdout; for unit tests.
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Stdout logging at the given debug level, plus an optional verbose
/// logfile. The returned guard must stay alive for the logfile writer.
pub fn setup_logging_default(level: u8, verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let logfile = verbose_logfile.map(|file| (file, EnvFilter::new("debug")));
    setup_logging(filter_for_level(level), logfile)
}

fn setup_logging(stdout_filter: EnvFilter, outfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(outfile)
            .expect("Failed to open log file");
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false)
                .with_file(true)
                .with_line_number(true);
            let stdout_layer = tracingfmt::layer().with_target(false);
            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });
        Some(guard)
    } else {
        INIT_LOG.call_once(|| {
            let stdout_layer = tracingfmt::layer().with_target(false);
            tracing_subscriber::registry()
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });
        None
    }
}
