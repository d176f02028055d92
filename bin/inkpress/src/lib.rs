//! inkpress CLI Library
//!
//! Process-level pieces of the inkpress static blog generator: the build and
//! watch commands and the static file server. The binary entry point in
//! `main.rs` wires them together.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, watch)
//! - [`server`] - Static file server for the output and assets directories
//!
//! # Example
//!
//! ```no_run
//! use inkpress::cmd::{self, Options};
//!
//! let options = Options::new("src", "generated", "templates");
//! cmd::build::run(&options).unwrap();
//! ```

pub mod cmd;
pub mod server;

pub use inkpress_generator::{BuildOptions, BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE)
///
/// A non-empty `RUST_LOG` replaces the verbosity level, so it can lower it too.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter(verbose, &directives))
        .init();
}

fn env_filter(verbose: u8, directives: &str) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}
