//! Small crate-wide convenience macros.

/// Debug-level log line.  Routes to `console.log` in the browser and to
/// stderr on host targets so unit tests never call into JS.
///
/// ```rust,ignore
/// debug_log!("Row {} clicked", id);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        let line = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&line.into());
        }
        #[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
        {
            eprintln!("[debug] {}", line);
        }
        #[cfg(all(not(target_arch = "wasm32"), not(debug_assertions)))]
        {
            let _ = line;
        }
    }};
}

/// Warning-level log line (`console.warn` in the browser).
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        let line = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&line.into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[warn] {}", line);
        }
    }};
}

/// Error-level log line (`console.error` in the browser).
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        let line = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&line.into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[error] {}", line);
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_resolve_by_crate_path() {
        crate::debug_log!("debug {}", 1);
        crate::warn_log!("warn {}", 2);
        crate::error_log!("error {}", 3);
    }
}
