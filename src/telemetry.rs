//! Telemetry helpers for hosts embedding `scrolly-charts`.
//!
//! Data loads, scene changes and scroll steps are reported through `tracing`.
//! Hosts either call one of the init helpers or install their own subscriber.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "scrolly_charts=info";

/// Installs a compact subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// `fallback` is parsed as an `EnvFilter` directive when `RUST_LOG` is absent.
/// Returns `false` when the feature is disabled or another global subscriber
/// is already installed.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
