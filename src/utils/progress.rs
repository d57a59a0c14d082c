//! Progress indicators for the download and extraction steps.
//!
//! [`ProgressBar`] wraps `indicatif` with the crate's styling. Bars created
//! with `enabled = false` are hidden, so callers never branch on whether
//! progress is shown. indicatif also hides bars on its own when stderr is not
//! a terminal.

use indicatif::{ProgressBar as IndicatifBar, ProgressBarIter, ProgressStyle as IndicatifStyle};
use std::io::Read;
use std::time::Duration;

/// A progress bar that may be hidden.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Bar counting bytes. With an unknown total it degrades to a spinner
    /// showing the bytes seen so far.
    pub fn bytes(total: Option<u64>, enabled: bool) -> Self {
        if !enabled {
            return Self::hidden();
        }

        let bar = match total {
            Some(len) => {
                let bar = IndicatifBar::new(len);
                bar.set_style(ProgressStyle::download());
                bar
            }
            None => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(ProgressStyle::bytes_spinner());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        Self {
            inner: bar,
        }
    }

    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Wrap a reader so every byte read advances the bar.
    pub fn wrap_read<R: Read>(&self, read: R) -> ProgressBarIter<R> {
        self.inner.wrap_read(read)
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

pub struct ProgressStyle;

impl ProgressStyle {
    pub fn download() -> IndicatifStyle {
        IndicatifStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
            .unwrap()
            .progress_chars("━╸━")
    }

    pub fn bytes_spinner() -> IndicatifStyle {
        IndicatifStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.cyan} {bytes} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }
}
