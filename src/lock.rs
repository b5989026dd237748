use std::sync::{Mutex, MutexGuard};

/// Lock `lock`, taking over the data if a previous holder panicked. The predictor
/// and sinks stay usable after a panic on another thread; the event is logged once
/// per recovery.
pub(crate) fn lock_or_recover<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        crate::log_debug(&format!("{context}: lock poisoned, continuing with last state"));
        tracing::warn!(context, "recovered poisoned lock");
        lock.clear_poison();
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn recovers_after_holder_panics() {
        let shared = Arc::new(Mutex::new(1));
        let clone = Arc::clone(&shared);
        let _ = thread::spawn(move || {
            let mut guard = clone.lock().unwrap();
            *guard = 2;
            panic!("holder died");
        })
        .join();
        assert!(shared.is_poisoned());
        assert_eq!(*lock_or_recover(&shared, "test"), 2);
        assert!(!shared.is_poisoned());
    }
}
