//! Download progress display on stderr.

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use debstat::source::ProgressCallback;

const BAR_TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} {bytes} ({bytes_per_sec})";

/// Progress bar for the Contents download.
///
/// Hidden when stderr is not a terminal or when `quiet` is set.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    pub fn new(message: String, quiet: bool) -> Self {
        let bar = ProgressBar::with_draw_target(None, draw_target(quiet));
        bar.set_style(bar_style(SPINNER_TEMPLATE));
        bar.set_message(message);
        Self { bar }
    }

    /// Callback to hand to the HTTP source.
    pub fn callback(&self) -> ProgressCallback {
        let bar = self.bar.clone();
        Box::new(move |downloaded, total| {
            // Unknown length keeps the spinner.
            if total > 0 && bar.length() != Some(total) {
                bar.set_length(total);
                bar.set_style(bar_style(BAR_TEMPLATE));
            }
            bar.set_position(downloaded);
        })
    }

    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for DownloadProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

fn draw_target(quiet: bool) -> ProgressDrawTarget {
    if quiet || !Term::stderr().is_term() {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stderr()
    }
}

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
