//! Mutex access that survives poisoning.

use std::sync::{Mutex, MutexGuard};

/// Locks a `Mutex` even if a previous holder panicked.
///
/// The panic that poisoned the lock is the failure worth reporting; the data behind
/// the lock is still usable for the counters and scripts it guards here.
pub trait IgnoreLock<T> {
    /// Locks the mutex, recovering the guard from a poisoned lock.
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T>;
}

impl<T> IgnoreLock<T> for Mutex<T> {
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let counter = Arc::new(Mutex::new(1u32));
        let shared = Arc::clone(&counter);
        let outcome = thread::spawn(move || {
            let _guard = shared.lock_ignore_poison();
            panic!("poison the lock");
        })
        .join();
        assert!(outcome.is_err());
        assert!(counter.is_poisoned());

        *counter.lock_ignore_poison() += 1;
        assert_eq!(*counter.lock_ignore_poison(), 2);
    }
}
