//! Process-wide default for the metrics cache
//!
//! A pipeline built without an explicit
//! [`enable_metrics_cache`](crate::PipelineBuilder::enable_metrics_cache)
//! call asks this module. The answer is off unless `LEADMARK_CACHE` holds a
//! truthy value (`1`, `true`, `yes`, `on`) or [`set_caching_enabled`] was
//! called. A runtime call always wins, and once one has happened the
//! environment is no longer consulted.
//!
//! ```
//! use leadmark_core::cache_config;
//!
//! cache_config::set_caching_enabled(true);
//! assert!(cache_config::is_caching_enabled());
//! cache_config::set_caching_enabled(false);
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable consulted until the switch is set explicitly
pub const CACHE_ENV_VAR: &str = "LEADMARK_CACHE";

const UNDECIDED: u8 = 0;
const OFF: u8 = 1;
const ON: u8 = 2;

static SWITCH: AtomicU8 = AtomicU8::new(UNDECIDED);

fn state(enabled: bool) -> u8 {
    if enabled {
        ON
    } else {
        OFF
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn from_env() -> bool {
    std::env::var(CACHE_ENV_VAR).is_ok_and(|val| parse_flag(&val))
}

/// Whether pipelines cache widths when not told otherwise
pub fn is_caching_enabled() -> bool {
    match SWITCH.load(Ordering::Acquire) {
        ON => true,
        OFF => false,
        _ => {
            let enabled = from_env();
            // A concurrent explicit setting beats the environment
            match SWITCH.compare_exchange(
                UNDECIDED,
                state(enabled),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if enabled {
                        log::info!("Metrics caching enabled via {CACHE_ENV_VAR}");
                    }
                    enabled
                },
                Err(current) => current == ON,
            }
        },
    }
}

/// Turn the default on or off for the rest of the process
pub fn set_caching_enabled(enabled: bool) {
    SWITCH.store(state(enabled), Ordering::Release);
    log::debug!(
        "Metrics cache default set to {}",
        if enabled { "on" } else { "off" }
    );
}
