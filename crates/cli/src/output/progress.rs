//! Progress bar wiring for transfer operations
//!
//! Bridges the core progress traits onto indicatif so uploads and downloads
//! show a live byte-level bar per item.

use s3c_core::{ProgressFactory, ProgressObserver, TransferRequest};

/// Creates one indicatif bar per transfer request
#[derive(Debug, Default)]
pub struct TransferBars;

impl ProgressFactory for TransferBars {
    fn for_request(&self, request: &TransferRequest) -> Box<dyn ProgressObserver> {
        let bar = indicatif::ProgressBar::no_length();
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(request.key.clone());
        Box::new(TransferBar { bar })
    }
}

/// Observer for a single transfer
struct TransferBar {
    bar: indicatif::ProgressBar,
}

impl ProgressObserver for TransferBar {
    fn update(&self, bytes_transferred: u64, total_bytes: u64) {
        // The total is only known once the transfer has started
        if self.bar.length() != Some(total_bytes) {
            self.bar.set_length(total_bytes);
        }
        self.bar.set_position(bytes_transferred);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s3c_core::TransferDirection;
    use std::path::PathBuf;

    fn request(key: &str) -> TransferRequest {
        TransferRequest {
            direction: TransferDirection::Upload,
            bucket: "bucket".into(),
            key: key.into(),
            local_path: PathBuf::from("x"),
            overwrite: false,
            show_progress: true,
            version_id: None,
        }
    }

    #[test]
    fn test_bar_tracks_length_and_position() {
        let factory = TransferBars;
        let observer = factory.for_request(&request("a.txt"));
        observer.update(10, 100);
        observer.update(100, 100);
        observer.finish();
    }
}
