//! Spinner shown while a background scan runs.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// The spinner is only drawn when `enabled`, stderr is a terminal and
    /// `NO_COLOR` is unset.
    pub fn new(enabled: bool) -> Self {
        let show = enabled && std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        let bar = show.then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                pb.set_style(style.tick_strings(TICKS));
            }
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });
        Self { bar }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        if let Some(bar) = &self.bar {
            bar.set_message(msg.into());
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
