use super::format::{format_playhead, format_timing, TimingText};
use crate::state::SharedState;
use crossbeam::channel::Sender;

/// A pending change to the display, applied on the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUpdate {
    Timing(TimingText),
    Playhead(String),
}

/// Samples the published state and turns it into display updates.
///
/// Holds nothing but the state handle, so polling the same state twice
/// yields the same updates.
#[derive(Clone)]
pub struct UiPoller {
    state: SharedState,
}

impl UiPoller {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Formats the current state without delivering it
    pub fn sample(&self) -> (DisplayUpdate, DisplayUpdate) {
        let snapshot = self.state.read();
        (
            DisplayUpdate::Timing(format_timing(snapshot.deviation_ms)),
            DisplayUpdate::Playhead(format_playhead(snapshot.position_ppq)),
        )
    }

    /// Posts both updates to the UI task queue.
    ///
    /// Returns false once the queue's receiving side is gone.
    pub fn poll(&self, queue: &Sender<DisplayUpdate>) -> bool {
        let (timing, playhead) = self.sample();
        queue.send(timing).is_ok() && queue.send(playhead).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_shared_state;
    use crossbeam::channel::unbounded;

    #[test]
    fn test_poll_posts_timing_then_playhead() {
        let state = create_shared_state();
        state.write(-12.34, 2.0);
        let poller = UiPoller::new(state);
        let (tx, rx) = unbounded();

        assert!(poller.poll(&tx));
        assert_eq!(
            rx.try_recv().unwrap(),
            DisplayUpdate::Timing(TimingText {
                early: "12.3 ms".to_string(),
                late: String::new(),
            })
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            DisplayUpdate::Playhead("PPQ: 2.000".to_string())
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_poll_reports_closed_queue() {
        let poller = UiPoller::new(create_shared_state());
        let (tx, rx) = unbounded();
        drop(rx);
        assert!(!poller.poll(&tx));
    }
}
