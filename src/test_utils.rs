//! Global test utilities for ensuring test isolation.

use std::sync::{Mutex, OnceLock};

/// Global mutex for tests that modify process environment variables.
///
/// Since `std::env::set_var` affects the entire process, tests that override
/// `HOME` or `PATH` (for curl shims) must serialize their execution through
/// this mutex to avoid races between parallel tests.
static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquire the global environment mutex with automatic poison recovery.
///
/// Hold the returned guard for the entire duration that the environment is
/// modified, and restore the original values before releasing it.
pub fn lock_env_mutex() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}
