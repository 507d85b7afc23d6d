//! Progress observation for transfers
//!
//! Transfer implementations report byte counts to an observer supplied by the
//! caller. The observer is invoked synchronously from the transfer loop and
//! must return quickly; it must never fail the transfer.

use crate::transfer::TransferRequest;

/// Sink for incremental transfer progress
pub trait ProgressObserver: Send + Sync {
    /// Report cumulative bytes transferred out of the expected total
    fn update(&self, bytes_transferred: u64, total_bytes: u64);

    /// Mark the transfer as complete
    fn finish(&self) {}
}

/// Creates one progress observer per transfer request
pub trait ProgressFactory: Send + Sync {
    /// Build an observer for the given request
    fn for_request(&self, request: &TransferRequest) -> Box<dyn ProgressObserver>;
}

/// Observer that discards all updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&self, _bytes_transferred: u64, _total_bytes: u64) {}
}

impl ProgressFactory for NoProgress {
    fn for_request(&self, _request: &TransferRequest) -> Box<dyn ProgressObserver> {
        Box::new(NoProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{TransferDirection, TransferRequest};

    #[test]
    fn test_no_progress_is_inert() {
        let observer = NoProgress;
        observer.update(0, 100);
        observer.update(100, 100);
        observer.finish();
    }

    #[test]
    fn test_no_progress_factory() {
        let request = TransferRequest {
            direction: TransferDirection::Upload,
            bucket: "b".into(),
            key: "k".into(),
            local_path: "k".into(),
            overwrite: false,
            show_progress: false,
            version_id: None,
        };
        let observer = NoProgress.for_request(&request);
        observer.update(1, 2);
    }
}
