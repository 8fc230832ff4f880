pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_loop;
pub mod host;
pub mod logging;
pub mod midi;
pub mod performer;
pub mod plugin;
pub mod scheduler;
pub mod state;
pub mod transport;
pub mod ui;

pub use cli::{handle_device_list, validate_device, Args};
pub use engine::{grid_deviation_ms, BlockOutcome, DeviationEngine};
pub use error::{PocketError, Result};
pub use event_loop::{UiEventLoop, UiHandle};
pub use host::{HostHandle, HostSimulator};
pub use plugin::PocketProcessor;
pub use scheduler::{create_scheduler, Scheduler, ThreadScheduler};
pub use state::{create_shared_state, PublishedSnapshot, PublishedState, SharedState};
pub use transport::{InternalTransport, PlayHead, TransportSnapshot};
