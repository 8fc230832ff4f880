// event_loop.rs

use crate::error::{PocketError, Result};
use crate::scheduler::Scheduler;
use crate::state::SharedState;
use crate::ui::{Display, DisplayUpdate, UiPoller};
use crossbeam::channel::{bounded, select, tick, unbounded, Receiver, Sender};
use log::{debug, error, info};
use std::thread::JoinHandle;
use std::time::Duration;

pub const DEFAULT_REFRESH_HZ: f64 = 30.0;

pub fn refresh_period(refresh_hz: f64) -> Duration {
    Duration::from_secs_f64(1.0 / refresh_hz)
}

/// The UI thread: a timer-driven poll plus a task queue feeding the display.
///
/// Poll results are never applied directly. They are queued and applied by a
/// later turn of the loop, so the display is only mutated in one place.
pub struct UiEventLoop<D: Display> {
    poller: UiPoller,
    display: D,
    tasks_tx: Sender<DisplayUpdate>,
    tasks_rx: Receiver<DisplayUpdate>,
    refresh_period: Duration,
}

impl<D: Display> UiEventLoop<D> {
    pub fn new(state: SharedState, display: D, refresh_period: Duration) -> Self {
        let (tasks_tx, tasks_rx) = unbounded();
        UiEventLoop {
            poller: UiPoller::new(state),
            display,
            tasks_tx,
            tasks_rx,
            refresh_period,
        }
    }

    /// Timer callback: sample the state and queue the results
    pub fn on_timer(&self) {
        if !self.poller.poll(&self.tasks_tx) {
            error!("UI task queue closed");
        }
    }

    /// Applies every queued update to the display
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.tasks_rx.try_recv() {
            self.display.apply(&update);
            applied += 1;
        }
        applied
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs until `shutdown` fires or its sender is dropped, then hands the
    /// display back.
    pub fn run(mut self, shutdown: Receiver<()>) -> D {
        info!(
            "UI loop started, refreshing every {:?}",
            self.refresh_period
        );
        let ticker = tick(self.refresh_period);
        let tasks = self.tasks_rx.clone();

        loop {
            select! {
                recv(ticker) -> _ => self.on_timer(),
                recv(tasks) -> task => match task {
                    Ok(update) => self.display.apply(&update),
                    Err(e) => {
                        error!("UI task queue error: {}", e);
                        break;
                    }
                },
                recv(shutdown) -> _ => {
                    debug!("UI loop shutdown requested");
                    break;
                }
            }
        }

        info!("UI loop stopped");
        self.display
    }
}

/// Owner of a running UI loop. Dropping it stops the periodic poll.
pub struct UiHandle<D> {
    shutdown_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<D>>,
}

impl<D: Display + Send + 'static> UiHandle<D> {
    pub fn spawn<S: Scheduler>(
        scheduler: &S,
        state: SharedState,
        display: D,
        refresh_hz: f64,
    ) -> Result<Self> {
        if !(refresh_hz.is_finite() && refresh_hz > 0.0) {
            return Err(PocketError::Config(format!(
                "refresh rate must be a positive number of Hz, got {}",
                refresh_hz
            )));
        }
        let (shutdown_tx, shutdown_rx) = bounded(1);
        let event_loop = UiEventLoop::new(state, display, refresh_period(refresh_hz));
        let thread = scheduler.spawn("pocket-ui", move || event_loop.run(shutdown_rx))?;

        Ok(UiHandle {
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }
}

impl<D> UiHandle<D> {
    /// Stops polling and waits for the UI thread, returning its display
    pub fn stop(&mut self) -> Option<D> {
        // Disconnecting the channel wakes the loop
        self.shutdown_tx.take();
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(display) => Some(display),
            Err(_) => {
                error!("UI thread panicked");
                None
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }
}

impl<D> Drop for UiHandle<D> {
    fn drop(&mut self) {
        self.stop();
    }
}
