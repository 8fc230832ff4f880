//! Standalone host
//!
//! Stands in for a DAW: drives [`PocketProcessor::process`] on a dedicated
//! audio thread at the block cadence, with transport from an
//! [`InternalTransport`] and MIDI from an [`EventSource`].

use crate::engine::BlockOutcome;
use crate::error::Result;
use crate::midi::{MidiInput, NoteEvent};
use crate::plugin::PocketProcessor;
use crate::scheduler::Scheduler;
use crate::transport::{InternalTransport, PlayHead, TransportSnapshot};
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Most MIDI events handed to the processor in one block
pub const MAX_EVENTS_PER_BLOCK: usize = 256;

const NUM_CHANNELS: usize = 2;

/// What an event source knows about the block being filled
#[derive(Debug, Clone, Copy)]
pub struct BlockContext {
    pub started: Instant,
    pub sample_rate: f64,
    pub block_len: u32,
    pub transport: Option<TransportSnapshot>,
}

impl BlockContext {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(f64::from(self.block_len) / self.sample_rate)
    }
}

/// Supplies the MIDI events for each block.
///
/// Called on the audio thread; implementations must not allocate, so
/// they only push while `events` has spare capacity.
pub trait EventSource: Send {
    fn fill_block(&mut self, ctx: &BlockContext, events: &mut Vec<NoteEvent>);
}

/// Pushes `event` if that can be done without growing `events`
pub fn push_bounded(events: &mut Vec<NoteEvent>, event: NoteEvent) -> bool {
    if events.len() < events.capacity() {
        events.push(event);
        true
    } else {
        false
    }
}

/// Places live MIDI into blocks by arrival time.
///
/// Messages that arrived while the previous block was playing are placed in
/// the current block at the same relative position, which costs one block of
/// latency but keeps their spacing.
pub struct MidiInputSource<M: MidiInput> {
    input: M,
    last_block_start: Option<Instant>,
}

impl<M: MidiInput> MidiInputSource<M> {
    pub fn new(input: M) -> Self {
        Self {
            input,
            last_block_start: None,
        }
    }
}

impl<M: MidiInput> EventSource for MidiInputSource<M> {
    fn fill_block(&mut self, ctx: &BlockContext, events: &mut Vec<NoteEvent>) {
        let window_start = self
            .last_block_start
            .or_else(|| ctx.started.checked_sub(ctx.duration()))
            .unwrap_or(ctx.started);
        self.last_block_start = Some(ctx.started);

        let last_sample = ctx.block_len.saturating_sub(1);
        while let Some(raw) = self.input.try_recv() {
            let elapsed = raw
                .received
                .checked_duration_since(window_start)
                .unwrap_or_default();
            let offset = (elapsed.as_secs_f64() * ctx.sample_rate) as u32;
            // Dropped when the block is full; nothing to do about it here
            let _ = push_bounded(
                events,
                NoteEvent::from_bytes(offset.min(last_sample), raw.bytes()),
            );
        }
    }
}

/// Per-run counters reported when the host stops
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostStats {
    pub blocks: u64,
    pub published: u64,
    pub overruns: u64,
}

/// Drives one processor at a fixed block size
pub struct HostSimulator<E: EventSource> {
    processor: PocketProcessor,
    transport: Arc<InternalTransport>,
    source: E,
    sample_rate: f64,
    block_len: u32,
    buffers: [Vec<f32>; NUM_CHANNELS],
    events: Vec<NoteEvent>,
    stats: HostStats,
}

impl<E: EventSource> HostSimulator<E> {
    pub fn new(
        mut processor: PocketProcessor,
        transport: Arc<InternalTransport>,
        source: E,
        sample_rate: f64,
        block_len: u32,
    ) -> Result<Self> {
        processor.prepare(sample_rate, block_len)?;
        let len = block_len as usize;

        Ok(HostSimulator {
            processor,
            transport,
            source,
            sample_rate,
            block_len,
            buffers: [vec![0.0; len], vec![0.0; len]],
            events: Vec::with_capacity(MAX_EVENTS_PER_BLOCK),
            stats: HostStats::default(),
        })
    }

    pub fn processor(&self) -> &PocketProcessor {
        &self.processor
    }

    pub fn transport(&self) -> &Arc<InternalTransport> {
        &self.transport
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn block_period(&self) -> Duration {
        Duration::from_secs_f64(f64::from(self.block_len) / self.sample_rate)
    }

    /// Runs one processing callback for a block starting at `started`, then
    /// moves the transport past it.
    pub fn run_block(&mut self, started: Instant) -> Option<BlockOutcome> {
        let ctx = BlockContext {
            started,
            sample_rate: self.sample_rate,
            block_len: self.block_len,
            transport: self.transport.current_position(),
        };

        self.events.clear();
        self.source.fill_block(&ctx, &mut self.events);

        let [left, right] = &mut self.buffers;
        let mut channels = [left.as_mut_slice(), right.as_mut_slice()];
        let outcome = self.processor.process(
            &mut channels,
            NUM_CHANNELS,
            &self.events,
            Some(self.transport.as_ref()),
        );

        self.transport.advance(self.block_len, self.sample_rate);

        self.stats.blocks += 1;
        if let Some(BlockOutcome::Published(_)) = outcome {
            self.stats.published += 1;
        }
        outcome
    }

    /// Processes blocks in real time until `running` is cleared
    pub fn run(mut self, running: Arc<AtomicBool>) -> HostStats {
        let block_period = self.block_period();
        info!(
            "Audio thread started: {} Hz, {} samples per block ({:?})",
            self.sample_rate, self.block_len, block_period
        );

        let mut deadline = Instant::now();
        while running.load(Ordering::SeqCst) {
            self.run_block(Instant::now());

            deadline += block_period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                self.stats.overruns += 1;
                deadline = now;
            }
        }

        if self.stats.overruns > 0 {
            warn!("Audio thread missed {} block deadline(s)", self.stats.overruns);
        }
        info!("Audio thread stopped after {} blocks", self.stats.blocks);
        self.stats
    }
}

/// Owner of a running audio thread
pub struct HostHandle {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<HostStats>>,
}

impl HostHandle {
    pub fn spawn<S, E>(scheduler: &S, host: HostSimulator<E>) -> Result<Self>
    where
        S: Scheduler,
        E: EventSource + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let thread = scheduler.spawn("pocket-audio", move || host.run(thread_running))?;

        Ok(HostHandle {
            running,
            thread: Some(thread),
        })
    }

    pub fn stop(&mut self) -> Option<HostStats> {
        self.running.store(false, Ordering::SeqCst);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(stats) => Some(stats),
            Err(_) => {
                error!("Audio thread panicked");
                None
            }
        }
    }
}

impl Drop for HostHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
