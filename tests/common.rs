use std::sync::Once;
use tracing::Level;

static INIT_TRACING: Once = Once::new();

/// Install a compact `tracing` subscriber once for the whole test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .without_time()
            .try_init();
    });
}
