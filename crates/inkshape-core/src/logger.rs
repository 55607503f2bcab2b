//! Minimal stderr logger for the CLI and test harnesses.
//!
//! Prints `[elapsed LEVEL module] message`, with the `inkshape_` crate prefix
//! dropped from the module path. Library code only talks to the `log`
//! facade; installing a logger is the binary's decision.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn short_target(target: &str) -> &str {
    target.strip_prefix("inkshape_").unwrap_or(target)
}

/// Map a `-v` count to a level: none is `Warn`, then `Info`, `Debug`,
/// and `Trace` from three on.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Route `log` records at or above `level` to stderr.
///
/// Only the first call installs the logger; later calls leave the installed
/// level in place and return `Ok`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Targets shown at `info` when `RUST_LOG` is unset; everything else is
/// held to `warn`.
#[cfg(feature = "tracing")]
const TRACE_TARGETS: [&str; 4] = [
    "inkshape",
    "inkshape_core",
    "inkshape_smooth",
    "inkshape_recognize",
];

#[cfg(feature = "tracing")]
fn default_trace_directives() -> String {
    std::iter::once("warn".to_owned())
        .chain(TRACE_TARGETS.iter().map(|target| format!("{target}=info")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install a `tracing` subscriber that reports span timings on close.
///
/// `RUST_LOG` overrides the default filter. With `json` every event is one
/// flattened JSON object; otherwise lines carry the process uptime.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_trace_directives()));
    let builder = fmt().with_env_filter(filter).with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.with_timer(fmt::time::Uptime::default()).finish().try_init()
    };
}
