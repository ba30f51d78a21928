//! Cleanup when the process exits normally.
//!
//! Nothing is installed until [`install_exit_handler`] is called. The handler
//! runs from `atexit`, so it fires on `std::process::exit` and on return from
//! `main`, but not on panics that abort or on signals.

use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use once_cell::sync::Lazy;

use crate::tracker::Tracker;

static REGISTER: Once = Once::new();
static TRACKERS: Lazy<Mutex<Vec<&'static Tracker>>> = Lazy::new(|| Mutex::new(Vec::new()));

fn trackers() -> MutexGuard<'static, Vec<&'static Tracker>> {
    TRACKERS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cleans `tracker` up when the process exits. Installing the same tracker
/// more than once has no further effect.
pub fn install_exit_handler(tracker: &'static Tracker) {
    {
        let mut trackers = trackers();
        if trackers.iter().any(|t| std::ptr::eq(*t, tracker)) {
            return;
        }
        trackers.push(tracker);
    }

    REGISTER.call_once(|| {
        let rc = unsafe { libc::atexit(cleanup_at_exit) };
        if rc != 0 {
            tracing::warn!(rc, "Could not register the exit handler");
        }
    });
}

pub fn is_installed(tracker: &'static Tracker) -> bool {
    trackers().iter().any(|t| std::ptr::eq(*t, tracker))
}

extern "C" fn cleanup_at_exit() {
    let trackers = std::mem::take(&mut *trackers());

    for tracker in trackers {
        tracker.cleanup();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        static TRACKER: Lazy<Tracker> = Lazy::new(Tracker::new);

        assert!(!is_installed(&TRACKER));
        install_exit_handler(&TRACKER);
        install_exit_handler(&TRACKER);

        assert!(is_installed(&TRACKER));
        assert_eq!(
            trackers().iter().filter(|t| std::ptr::eq(**t, &*TRACKER)).count(),
            1
        );
    }
}
