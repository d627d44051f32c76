use indicatif::{ProgressBar, ProgressStyle};
use progcp_core::ProgressReporter;

const BAR_TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Terminal byte progress bar. Drawn on stderr and hidden automatically when
/// stderr is not a terminal.
#[derive(Default)]
pub struct IndicatifReporter {
    bar: Option<ProgressBar>,
}

impl IndicatifReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

impl ProgressReporter for IndicatifReporter {
    fn initialize(&mut self, total_bytes: u64, label: &str) {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(bar_style());
        bar.set_message(label.to_owned());
        self.bar = Some(bar);
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    fn finalize(&mut self) {
        if let Some(bar) = self.bar.take() {
            if bar.length().is_some_and(|len| bar.position() >= len) {
                bar.finish();
            } else {
                bar.abandon();
            }
        }
    }
}
