use super::format::{align, TimingText, PLAYHEAD_ALIGNMENT, STOPPED_TEXT};
use super::poller::DisplayUpdate;
use super::progress::{create_playhead_line, create_timing_line};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use log::{debug, info};

/// Where formatted text ends up. Only ever touched from the UI thread.
pub trait Display {
    fn set_timing(&mut self, text: &TimingText);
    fn set_playhead(&mut self, text: &str);

    fn apply(&mut self, update: &DisplayUpdate) {
        match update {
            DisplayUpdate::Timing(text) => self.set_timing(text),
            DisplayUpdate::Playhead(text) => self.set_playhead(text),
        }
    }
}

/// Width of each half of the timing readout, in columns
const SIDE_WIDTH: usize = 12;
const PLAYHEAD_WIDTH: usize = SIDE_WIDTH * 2 + 3;

/// Renders the timing readout as `<early> | <late>` over a playhead line
pub fn render_timing(text: &TimingText) -> String {
    format!(
        "{} | {}",
        align(&text.early, SIDE_WIDTH, TimingText::EARLY_ALIGNMENT),
        align(&text.late, SIDE_WIDTH, TimingText::LATE_ALIGNMENT)
    )
}

pub fn render_playhead(text: &str) -> String {
    align(text, PLAYHEAD_WIDTH, PLAYHEAD_ALIGNMENT)
}

/// Terminal display built from indicatif spinner lines
pub struct ConsoleDisplay {
    #[allow(dead_code)]
    multi_progress: MultiProgress,
    timing_line: ProgressBar,
    playhead_line: ProgressBar,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let multi_progress = MultiProgress::with_draw_target(target);
        let timing_line = create_timing_line(&multi_progress);
        let playhead_line = create_playhead_line(&multi_progress);

        timing_line.set_message(render_timing(&TimingText::default()));
        playhead_line.set_message(render_playhead(STOPPED_TEXT));

        ConsoleDisplay {
            multi_progress,
            timing_line,
            playhead_line,
        }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ConsoleDisplay {
    fn set_timing(&mut self, text: &TimingText) {
        self.timing_line.set_message(render_timing(text));
    }

    fn set_playhead(&mut self, text: &str) {
        self.playhead_line.set_message(render_playhead(text));
    }
}

impl Drop for ConsoleDisplay {
    fn drop(&mut self) {
        self.timing_line.finish();
        self.playhead_line.finish();
    }
}

/// Headless display that logs whenever the readout changes
#[derive(Default)]
pub struct LogDisplay {
    timing: TimingText,
    playhead: String,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for LogDisplay {
    fn set_timing(&mut self, text: &TimingText) {
        if *text != self.timing {
            if !text.is_blank() {
                info!("Timing: {}", render_timing(text).trim());
            }
            self.timing = text.clone();
        }
    }

    fn set_playhead(&mut self, text: &str) {
        if text != self.playhead {
            debug!("Playhead: {}", text);
            self.playhead = text.to_string();
        }
    }
}
