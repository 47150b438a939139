/// Macros for timestamped console logging.
///
/// On `wasm32` these wrap `gloo_console` and prefix every line with
/// `js_sys::Date::now()`. Native builds (tests, tooling) have no browser
/// console, so the same call sites are routed to `tracing` instead.
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::info!(format!("[{}] {}", js_sys::Date::now(), format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::info!($($arg)*);
    }};
}

#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::warn!(format!("[{}] {}", js_sys::Date::now(), format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::warn!($($arg)*);
    }};
}

#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::error!(format!("[{}] {}", js_sys::Date::now(), format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::error!($($arg)*);
    }};
}

#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::debug!(format!("[{}] {}", js_sys::Date::now(), format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::debug!($($arg)*);
    }};
}
