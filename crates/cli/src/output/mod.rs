//! Output formatting utilities
//!
//! Shell replies go to stdout, errors to stderr. This module also renders
//! directory listings and shows a spinner during transfers.

mod formatter;
pub mod listing;
mod progress;

pub use formatter::Formatter;
pub use listing::Renderer;
pub use progress::Spinner;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
    /// Disable the transfer spinner
    pub no_progress: bool,
}
