//! Cooperative cancellation for long-running operations.
use crate::error::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A shared "keep running" flag with an optional wall-clock deadline.
///
/// Core operations call [`CancelToken::check`] before every blocking step.
/// A step that is already in progress is never interrupted; the token only
/// prevents the next one from starting. Clones share the same flag.
#[derive(Clone, Debug)]
pub struct CancelToken {
    running: Arc<AtomicBool>,
    deadline: Option<(Instant, Duration)>,
}

impl CancelToken {
    /// A token that only stops when [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            deadline: None,
        }
    }

    /// A token that also expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            deadline: Some((Instant::now() + timeout, timeout)),
        }
    }

    /// Wraps an existing flag, e.g. one toggled by a Ctrl+C handler.
    pub fn from_flag(running: Arc<AtomicBool>) -> Self {
        Self {
            running,
            deadline: None,
        }
    }

    pub fn cancel(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|(deadline, _)| Instant::now() >= deadline)
    }

    /// The limit this token was created with, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.deadline.map(|(_, timeout)| timeout)
    }

    /// Time left before the deadline, if there is one.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|(deadline, _)| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails with [`Error::Timeout`] or [`Error::Cancelled`] if the operation
    /// should stop. A passed deadline takes precedence.
    pub fn check(&self) -> Result<()> {
        if let Some((deadline, timeout)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::Timeout(timeout));
            }
        }
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn fresh_token_passes() {
        let token = CancelToken::new();
        assert!(token.check().is_ok());
        assert!(token.remaining().is_none());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert_eq!(token.check().unwrap_err().kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn zero_timeout_is_already_expired() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        assert!(token.is_expired());
        assert_eq!(token.check().unwrap_err().kind(), ErrorKind::Timeout);
    }

    #[test]
    fn deadline_wins_over_cancel() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        token.cancel();
        assert!(matches!(token.check(), Err(Error::Timeout(_))));
    }

    #[test]
    fn flag_from_signal_handler_is_honored() {
        let flag = Arc::new(AtomicBool::new(true));
        let token = CancelToken::from_flag(flag.clone());
        flag.store(false, Ordering::SeqCst);
        assert!(token.is_cancelled());
    }
}
