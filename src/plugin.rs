//! The plugin instance as the host sees it

use crate::engine::{BlockOutcome, DeviationEngine};
use crate::error::{PocketError, Result};
use crate::event_loop::UiHandle;
use crate::midi::NoteEvent;
use crate::scheduler::Scheduler;
use crate::state::{create_shared_state, SharedState};
use crate::transport::PlayHead;
use crate::ui::Display;
use log::info;

pub const PLUGIN_NAME: &str = "Pocket";

/// One plugin instance: the deviation engine plus the state its editor reads.
///
/// Audio passes through untouched. Output channels without a matching
/// input are cleared, since hosts may hand them over holding garbage.
pub struct PocketProcessor {
    engine: DeviationEngine,
    sample_rate: f64,
    max_block_len: u32,
}

impl Default for PocketProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PocketProcessor {
    pub fn new() -> Self {
        Self {
            engine: DeviationEngine::new(create_shared_state()),
            sample_rate: 0.0,
            max_block_len: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn accepts_midi(&self) -> bool {
        true
    }

    pub fn produces_midi(&self) -> bool {
        false
    }

    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }

    /// Called by the host before processing starts or when the format changes
    pub fn prepare(&mut self, sample_rate: f64, max_block_len: u32) -> Result<()> {
        if sample_rate.is_nan() || sample_rate <= 0.0 {
            return Err(PocketError::InvalidSampleRate(sample_rate));
        }
        info!(
            "{} prepared: {} Hz, up to {} samples per block",
            PLUGIN_NAME, sample_rate, max_block_len
        );
        self.sample_rate = sample_rate;
        self.max_block_len = max_block_len;
        Ok(())
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_block_len(&self) -> u32 {
        self.max_block_len
    }

    pub fn is_prepared(&self) -> bool {
        self.sample_rate > 0.0
    }

    /// Shared with the editor
    pub fn shared_state(&self) -> SharedState {
        self.engine.state().clone()
    }

    /// Realtime callback.
    ///
    /// `channels` holds the output buffers, of which the first `num_inputs`
    /// already contain the input signal. Does nothing until prepared.
    pub fn process<P: PlayHead + ?Sized>(
        &self,
        channels: &mut [&mut [f32]],
        num_inputs: usize,
        events: &[NoteEvent],
        playhead: Option<&P>,
    ) -> Option<BlockOutcome> {
        let block_len = channels.first().map_or(0, |c| c.len());

        for channel in channels.iter_mut().skip(num_inputs) {
            channel.fill(0.0);
        }

        if !self.is_prepared() {
            return None;
        }

        let transport = playhead.and_then(|p| p.current_position());
        Some(self.engine.process_block(
            self.sample_rate,
            block_len as u32,
            transport.as_ref(),
            events,
        ))
    }

    /// Opens the editor: a UI loop polling this instance's state at `refresh_hz`
    pub fn create_editor<S, D>(&self, scheduler: &S, display: D, refresh_hz: f64) -> Result<UiHandle<D>>
    where
        S: Scheduler,
        D: Display + Send + 'static,
    {
        UiHandle::spawn(scheduler, self.shared_state(), display, refresh_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportSnapshot;

    #[test]
    fn test_prepare_rejects_bad_sample_rates() {
        let mut processor = PocketProcessor::new();
        assert!(processor.prepare(0.0, 512).is_err());
        assert!(processor.prepare(-44_100.0, 512).is_err());
        assert!(processor.prepare(f64::NAN, 512).is_err());
        assert!(!processor.is_prepared());
        assert!(processor.prepare(44_100.0, 512).is_ok());
        assert!(processor.is_prepared());
    }

    #[test]
    fn test_editor_rejects_zero_refresh_rate() {
        let processor = PocketProcessor::new();
        let scheduler = crate::scheduler::ThreadScheduler::new();
        let result = processor.create_editor(&scheduler, crate::ui::LogDisplay::new(), 0.0);
        assert!(matches!(result, Err(PocketError::Config(_))));
    }

    #[test]
    fn test_unprepared_processor_skips_engine() {
        let processor = PocketProcessor::new();
        let mut left = vec![0.5f32; 64];
        let mut channels = [left.as_mut_slice()];
        let playhead = TransportSnapshot::playing(120.0, 0.0);

        let outcome = processor.process(&mut channels, 1, &[], Some(&playhead));
        assert_eq!(outcome, None);
        assert_eq!(processor.shared_state().read().position_ppq, -1.0);
    }
}
