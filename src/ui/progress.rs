//! Download progress display.

use indicatif::{ProgressBar, ProgressStyle};

/// Byte-progress bar for a single download.
///
/// Shows a fixed-width block bar, integer percentage, and humanized byte
/// counts. Without a Content-Length there is nothing to show a percentage
/// against, so the display stays silent and bytes are simply written.
pub struct DownloadProgress {
    bar: Option<ProgressBar>,
    total: u64,
}

impl DownloadProgress {
    /// Create a progress display for a download of (maybe) known size.
    pub fn new(total: Option<u64>, enabled: bool) -> Self {
        let total = total.unwrap_or(0);
        let bar = if enabled && total > 0 {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:20} {percent:>3}% ({msg})")
                    .expect("valid progress template")
                    .progress_chars("█░"),
            );
            Some(bar)
        } else {
            None
        };

        Self { bar, total }
    }

    /// Update with the running byte count.
    pub fn update(&self, downloaded: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(downloaded);
            bar.set_message(format!(
                "{}/{}",
                format_size(downloaded),
                format_size(self.total)
            ));
        }
    }

    /// Clear the bar; the caller reports completion.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Human-readable byte count using 1024-based units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}TB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_bytes() {
        assert_eq!(format_size(0), "0.0B");
        assert_eq!(format_size(512), "512.0B");
        assert_eq!(format_size(1023), "1023.0B");
    }

    #[test]
    fn format_size_kilobytes() {
        assert_eq!(format_size(1024), "1.0KB");
        assert_eq!(format_size(1536), "1.5KB");
    }

    #[test]
    fn format_size_megabytes() {
        assert_eq!(format_size(5 * 1024 * 1024), "5.0MB");
    }

    #[test]
    fn format_size_gigabytes() {
        assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2.0GB");
    }

    #[test]
    fn format_size_terabytes() {
        assert_eq!(format_size(3 * 1024u64.pow(4)), "3.0TB");
    }

    #[test]
    fn unknown_total_shows_no_bar() {
        let progress = DownloadProgress::new(None, true);
        assert!(progress.bar.is_none());
        // Updates are a no-op but must not panic.
        progress.update(100);
        progress.finish();
    }

    #[test]
    fn disabled_progress_shows_no_bar() {
        let progress = DownloadProgress::new(Some(1000), false);
        assert!(progress.bar.is_none());
    }

    #[test]
    fn known_total_creates_bar() {
        let progress = DownloadProgress::new(Some(1000), true);
        assert!(progress.bar.is_some());
        progress.update(500);
        progress.finish();
    }
}
