use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

fn message_line(prefix: &'static str, template: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix(prefix);
    pb
}

pub fn create_timing_line(multi_progress: &MultiProgress) -> ProgressBar {
    multi_progress.add(message_line("Timing", "{prefix:>8.bold} {msg}"))
}

pub fn create_playhead_line(multi_progress: &MultiProgress) -> ProgressBar {
    multi_progress.add(message_line("Playhead", "{prefix:>8.bold.dim} {msg:.cyan}"))
}
