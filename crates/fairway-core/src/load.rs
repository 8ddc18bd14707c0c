//! Background page loads that can be abandoned.
//!
//! Each load runs on its own thread and reports over a channel. Cancelling a
//! load does not stop the request; it only guarantees the result is dropped
//! instead of reaching a consumer that has moved on.

use crate::error::{FairwayError, Result};
use crate::page::{Page, PageId};
use crate::source::PageSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};

pub struct LoadHandle {
    page: PageId,
    cancelled: Arc<AtomicBool>,
    rx: Receiver<Result<Page>>,
}

/// Start loading `page` from `source` on a background thread.
pub fn spawn_load(source: Arc<dyn PageSource>, page: PageId) -> LoadHandle {
    let (tx, rx) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    std::thread::spawn(move || {
        log::debug!("Loading {}", page);
        let result = source.load(page);
        if flag.load(Ordering::Relaxed) {
            log::debug!("Discarding result for cancelled load of {}", page);
            return;
        }
        // The receiver may be gone already; nobody is waiting then.
        let _ = tx.send(result);
    });

    LoadHandle {
        page,
        cancelled,
        rx,
    }
}

impl LoadHandle {
    pub fn page(&self) -> PageId {
        self.page
    }

    /// Abandon the load. Any later result is discarded.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Non-blocking check for a finished load. Cancelled loads never yield.
    pub fn poll(&self) -> Option<Result<Page>> {
        if self.is_cancelled() {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(interrupted(self.page))),
        }
    }

    /// Block until the load finishes. Returns `None` once cancelled.
    pub fn wait(self) -> Option<Result<Page>> {
        if self.is_cancelled() {
            return None;
        }
        match self.rx.recv() {
            Ok(result) if !self.is_cancelled() => Some(result),
            Ok(_) => None,
            Err(_) if self.is_cancelled() => None,
            Err(_) => Some(Err(interrupted(self.page))),
        }
    }
}

fn interrupted(page: PageId) -> FairwayError {
    FairwayError::Interrupted(format!("loader for {} stopped without a result", page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::mpsc::Sender;
    use std::time::{Duration, Instant};

    /// Source that blocks until the test releases it.
    struct Gated {
        gate: Mutex<Receiver<()>>,
    }

    impl PageSource for Gated {
        fn load(&self, page: PageId) -> Result<Page> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(Page {
                id: page,
                title: page.label(),
                subtitle: None,
                tables: Vec::new(),
            })
        }
    }

    fn gated() -> (Arc<dyn PageSource>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(Gated { gate: Mutex::new(rx) }), tx)
    }

    fn poll_for(handle: &LoadHandle, limit: Duration) -> Option<Result<Page>> {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if let Some(result) = handle.poll() {
                return Some(result);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_poll_delivers_result() {
        let (source, release) = gated();
        let handle = spawn_load(source, PageId::Round(2));
        assert!(handle.poll().is_none());
        release.send(()).unwrap();
        let page = poll_for(&handle, Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(page.id, PageId::Round(2));
    }

    #[test]
    fn test_cancelled_load_is_discarded() {
        let (source, release) = gated();
        let handle = spawn_load(source, PageId::Overall);
        handle.cancel();
        release.send(()).unwrap();
        assert!(poll_for(&handle, Duration::from_millis(200)).is_none());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_wait_after_cancel() {
        let (source, release) = gated();
        let handle = spawn_load(source, PageId::Round(1));
        handle.cancel();
        release.send(()).unwrap();
        assert!(handle.wait().is_none());
    }

    #[test]
    fn test_wait_returns_errors() {
        struct Failing;
        impl PageSource for Failing {
            fn load(&self, _page: PageId) -> Result<Page> {
                Err(FairwayError::Upstream("Sheet locked".to_string()))
            }
        }
        let handle = spawn_load(Arc::new(Failing), PageId::Round(1));
        match handle.wait() {
            Some(Err(FairwayError::Upstream(msg))) => assert_eq!(msg, "Sheet locked"),
            other => panic!("expected upstream error, got {:?}", other.map(|r| r.is_ok())),
        }
    }
}
