/// Deviations smaller than this (in ms) are shown as on the grid
pub const DEAD_ZONE_MS: f64 = 0.001;

pub const STOPPED_TEXT: &str = "Stopped";

/// How a display should justify a piece of text within its area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Centre,
    Right,
}

/// Text for the two halves of the timing readout.
///
/// At most one side is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingText {
    /// Shown to the left of the divider, right-aligned
    pub early: String,
    /// Shown to the right of the divider, left-aligned
    pub late: String,
}

impl TimingText {
    pub const EARLY_ALIGNMENT: Alignment = Alignment::Right;
    pub const LATE_ALIGNMENT: Alignment = Alignment::Left;

    pub fn is_blank(&self) -> bool {
        self.early.is_empty() && self.late.is_empty()
    }
}

pub fn format_timing(deviation_ms: f64) -> TimingText {
    if deviation_ms < -DEAD_ZONE_MS {
        TimingText {
            early: format!("{:.1} ms", deviation_ms.abs()),
            late: String::new(),
        }
    } else if deviation_ms > DEAD_ZONE_MS {
        TimingText {
            early: String::new(),
            late: format!("+ {:.1} ms", deviation_ms),
        }
    } else {
        TimingText::default()
    }
}

pub const PLAYHEAD_ALIGNMENT: Alignment = Alignment::Centre;

pub fn format_playhead(position_ppq: f64) -> String {
    if position_ppq >= 0.0 {
        format!("PPQ: {:.3}", position_ppq)
    } else {
        STOPPED_TEXT.to_string()
    }
}

/// Pads `text` to `width` columns according to `alignment`
pub fn align(text: &str, width: usize, alignment: Alignment) -> String {
    match alignment {
        Alignment::Left => format!("{:<width$}", text, width = width),
        Alignment::Centre => format!("{:^width$}", text, width = width),
        Alignment::Right => format!("{:>width$}", text, width = width),
    }
}
