//! Opt-in diagnostic output.
//!
//! The CLI's `--verbose` flag flips one process-global switch; `verbose!`
//! then writes to stderr, keeping diagnostics out of the rendered report
//! on stdout. Off by default, so library consumers stay silent unless they
//! ask.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

#[doc(hidden)]
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Print a formatted diagnostic line when verbose output is on.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::enabled() {
            eprintln!("[verbose] {}", format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_is_off_until_set() {
        set_verbose(false);
        assert!(!enabled());
        set_verbose(true);
        assert!(enabled());
        set_verbose(false);
    }
}
