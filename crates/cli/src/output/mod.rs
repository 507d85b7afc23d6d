//! Output formatting utilities
//!
//! This module provides the human-readable output formatter, progress bars
//! for transfers, and table rendering for listings.

mod formatter;
mod progress;
mod table;

pub use formatter::Formatter;
pub use progress::TransferBars;
pub use table::render_objects;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
}
