//! Tracing setup for host applications and tests.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a global tracing subscriber honoring `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops. Host applications
/// with their own subscriber should simply not call this.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
