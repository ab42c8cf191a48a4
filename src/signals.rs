//! Termination signal handling
//!
//! A listener thread removes the registered scratch directories before the
//! process exits on SIGINT, SIGTERM or SIGHUP.

use crate::temp::CleanupRegistry;

/// Install the cleanup listener
#[cfg(unix)]
pub fn install_cleanup_handler(registry: &CleanupRegistry) -> std::io::Result<()> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    let registry = registry.clone();

    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            tracing::debug!(signal = sig, "received termination signal, cleaning up");
            registry.remove_all();
            std::process::exit(128 + sig);
        }
    });

    Ok(())
}

#[cfg(not(unix))]
pub fn install_cleanup_handler(_registry: &CleanupRegistry) -> std::io::Result<()> {
    Ok(())
}
