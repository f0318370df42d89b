//! Runs an install on a worker thread so the window keeps repainting.
//!
//! The window polls the job once per frame. When the deadline passes the job
//! reports a timeout right away and cancels its token; the worker notices at
//! its next step and exits on its own. A blocking ADB call that is already in
//! flight is not interrupted.
use bydadb_core::install::{self, InstallEvent, InstallSummary};
use bydadb_core::{Bridge, CancelToken, Error, ErrorKind, RecentAddresses, Result};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

enum JobMessage {
    Event(InstallEvent),
    Done(Result<InstallSummary>),
}

pub struct InstallJob {
    rx: Receiver<JobMessage>,
    cancel: CancelToken,
    status: String,
}

impl InstallJob {
    /// Starts installing `packages` on `address` with the given deadline.
    pub fn spawn<B>(
        mut bridge: B,
        store: RecentAddresses,
        address: String,
        packages: Vec<PathBuf>,
        timeout: Duration,
    ) -> Self
    where
        B: Bridge + Send + 'static,
    {
        let (tx, rx) = channel();
        let cancel = CancelToken::with_timeout(timeout);
        let token = cancel.clone();

        thread::spawn(move || {
            debug!(%address, count = packages.len(), "installer thread started");
            let result = install::run(&mut bridge, &store, &address, &packages, &token, |event| {
                tx.send(JobMessage::Event(event.clone())).ok();
            });
            // The window may already have given up on us.
            tx.send(JobMessage::Done(result)).ok();
            debug!("installer thread finished");
        });

        Self {
            rx,
            cancel,
            status: "Starting installation...".to_string(),
        }
    }

    /// Text for the progress window's label.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Time left before the job is abandoned.
    pub fn remaining(&self) -> Duration {
        self.cancel.remaining().unwrap_or_default()
    }

    /// Applies pending progress and returns the outcome once there is one.
    pub fn poll(&mut self) -> Option<Result<InstallSummary>> {
        loop {
            match self.rx.try_recv() {
                Ok(JobMessage::Event(event)) => self.status = event.describe(),
                Ok(JobMessage::Done(result)) => {
                    self.status = match &result {
                        Ok(_) => "All APKs installed successfully!".to_string(),
                        Err(e) if e.kind() == ErrorKind::Timeout => {
                            "Operation timed out.".to_string()
                        }
                        Err(e) => format!("{} occurred.", e.kind().title()),
                    };
                    return Some(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("installer thread exited without a result");
                    return Some(Err(Error::Other(
                        "the installer stopped unexpectedly".to_string(),
                    )));
                }
            }
        }

        if self.cancel.is_expired() {
            self.cancel.cancel();
            self.status = "Operation timed out.".to_string();
            let limit = self.cancel.timeout().unwrap_or_default();
            return Some(Err(Error::Timeout(limit)));
        }

        None
    }
}

impl Drop for InstallJob {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
