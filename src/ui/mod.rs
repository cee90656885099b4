//! Terminal output: theme, verbosity modes, and download progress.

pub mod output;
pub mod progress;
pub mod theme;

pub use output::{Output, OutputMode};
pub use progress::{format_size, DownloadProgress};
pub use theme::Theme;
