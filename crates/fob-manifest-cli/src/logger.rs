//! Logging setup for the fob-manifest CLI.
//!
//! Logs go to stderr so that `inject` and `graph` can write their results to
//! stdout unmixed.
//!
//! - `--verbose` enables debug output for the manifest crates
//! - `--quiet` keeps errors only
//! - otherwise `RUST_LOG` applies, falling back to warnings

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at startup, before any logging occurs.
///
/// ```rust,no_run
/// use fob_manifest_cli::logger::init_logger;
///
/// // Debug logging without colors
/// init_logger(true, false, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("fob_manifest=debug,fob_manifest_cli=debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fob_manifest=warn,fob_manifest_cli=info"))
    }
}

/// Whether stderr can show colors. `NO_COLOR` always wins.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stderr().features().colors_supported()
}
