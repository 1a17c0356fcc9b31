/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "spendmate_core=info";

/// Install a global fmt subscriber honouring `RUST_LOG`. Safe to call more than
/// once; only the first call has an effect. Hosts with their own subscriber
/// should not call this.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing() {
    use std::sync::Once;
    use tracing_subscriber::{fmt, EnvFilter};

    static TRACING_INIT: Once = Once::new();

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host application.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
