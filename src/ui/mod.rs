//! User interface side of Pocket
//!
//! This module turns the published timing state into display text:
//! - [`format`] holds the formatting rules (dead zone, early/late split, playhead)
//! - [`UiPoller`] samples the shared state and posts [`DisplayUpdate`]s
//! - [`Display`] is whatever finally shows the text
//!
//! The terminal display is built using the indicatif library.

mod display;
pub mod format;
mod poller;
mod progress;

pub use display::{render_playhead, render_timing, ConsoleDisplay, Display, LogDisplay};
pub use format::{format_playhead, format_timing, Alignment, TimingText, DEAD_ZONE_MS};
pub use poller::{DisplayUpdate, UiPoller};
pub use progress::{create_playhead_line, create_timing_line};
