//! Cooperative cancellation
//!
//! The front end may request cancellation at any time (e.g. a user
//! quit); the engine checks the token at round and match boundaries
//! only and returns cleanly with whatever scores have accumulated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheap cloneable cancellation flag. All clones share one flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Irrevocable for this token's lifetime.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
