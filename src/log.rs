//! Logger setup for the cercaparole front ends.
//!
//! The library itself only emits records through the `log` facade:
//!
//! - `warn!` when the position shorthand pins one position twice,
//! - `info!` with word and file counts after a corpus load,
//! - `debug!` per word list, per cache hit/miss and per filter run.
//!
//! Nothing is printed until a binary (or the WASM `initialize` entry) installs
//! a logger here.

#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Environment variable that turns on debug logging in the CLI binaries.
pub const DEBUG_ENV_VAR: &str = "CERCAPAROLE_DEBUG";

/// Install the logger for this build.
///
/// # Behavior
/// - **Native (CLI):** `Warn` by default, so result output on stdout is only
///   accompanied by warnings on stderr; `Debug` when `debug_enabled`
///   (see [`DEBUG_ENV_VAR`]). `RUST_LOG`, if set, overrides both.
/// - **WASM:** `Info` by default (load counts go to the browser console),
///   `Debug` when `debug_enabled`.
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled {
            log::Level::Debug
        } else {
            log::Level::Info
        };

        if let Err(e) = console_log::init_with_level(level) {
            let msg = format!("cercaparole: console logging unavailable ({e})");
            web_sys::console::error_1(&msg.into());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("Logger ready (default level {level:?})");
        }
    }
}

/// True if [`DEBUG_ENV_VAR`] is set in the environment.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn debug_requested() -> bool {
    std::env::var_os(DEBUG_ENV_VAR).is_some()
}
