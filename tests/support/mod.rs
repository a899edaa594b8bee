//! Shared helpers for integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily set or removed.
///
/// Access to the process environment is serialized so parallel tests do not
/// observe each other's variables, and the previous values are restored even
/// if `f` panics.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut snapshot: HashMap<String, Option<String>> = HashMap::new();
    for (key, value) in changes {
        snapshot
            .entry((*key).to_string())
            .or_insert_with(|| std::env::var(key).ok());
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    struct Restore(HashMap<String, Option<String>>);
    impl Drop for Restore {
        fn drop(&mut self) {
            for (key, value) in self.0.drain() {
                match value {
                    Some(v) => std::env::set_var(&key, v),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
    let _restore = Restore(snapshot);

    f()
}
