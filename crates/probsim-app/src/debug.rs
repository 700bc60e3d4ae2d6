use std::sync::OnceLock;

pub const DEBUG_LOGS_ENV: &str = "PROBSIM_DEBUG_LOGS";

/// Returns true if debug logging is forced on via `PROBSIM_DEBUG_LOGS`.
///
/// Accepts "1", "true", or "on" (case-insensitive). Cached after the first read.
pub fn debug_enabled() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| {
        std::env::var(DEBUG_LOGS_ENV)
            .map(|v| is_truthy(&v))
            .unwrap_or(false)
    })
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("on")
}
