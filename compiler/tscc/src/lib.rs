//! tsc command-line driver.
//!
//! The binary in `main.rs` only parses the subcommand; the handlers live in
//! [`commands`] so they can be tested without spawning a process.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
