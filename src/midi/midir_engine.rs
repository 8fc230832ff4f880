use crate::error::{PocketError, Result};
use crate::midi::{MidiInput, RawMidi};
use crossbeam::channel::{bounded, Receiver, TryRecvError};
use log::{debug, info, warn};
use midir::{Ignore, MidiInputConnection};
use std::time::Instant;

/// Messages buffered between the MIDI callback thread and the audio thread
const INPUT_QUEUE_CAPACITY: usize = 1024;

const CLIENT_NAME: &str = "pocket-in";

/// Live MIDI input backed by a midir connection
pub struct MidirInput {
    #[allow(dead_code)]
    connection: MidiInputConnection<()>,
    rx: Receiver<RawMidi>,
    port_name: String,
}

impl MidirInput {
    /// Connects to the first input port whose name contains `device_name`
    pub fn connect(device_name: &str) -> Result<Self> {
        let mut midi_in = midir::MidiInput::new(CLIENT_NAME)?;
        midi_in.ignore(Ignore::None);

        let in_ports = midi_in.ports();
        let (in_port, port_name) = in_ports
            .iter()
            .filter_map(|p| midi_in.port_name(p).ok().map(|name| (p, name)))
            .find(|(_, name)| name.contains(device_name))
            .ok_or_else(|| PocketError::DeviceNotFound(device_name.to_string()))?;

        info!("Connecting to MIDI input port: {}", port_name);

        let (tx, rx) = bounded(INPUT_QUEUE_CAPACITY);
        let connection = midi_in.connect(
            in_port,
            "pocket-input",
            move |_stamp, message, _| {
                // Never block the driver thread. A full queue means the audio
                // thread is stalled and the message is dropped.
                let _ = tx.try_send(RawMidi::new(Instant::now(), message));
            },
            (),
        )?;

        Ok(MidirInput {
            connection,
            rx,
            port_name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiInput for MidirInput {
    fn try_recv(&mut self) -> Option<RawMidi> {
        match self.rx.try_recv() {
            Ok(raw) => Some(raw),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Names of every MIDI input port currently visible
pub fn list_input_devices() -> Vec<String> {
    let mut devices = Vec::new();

    match midir::MidiInput::new("pocket-list") {
        Ok(midi_in) => {
            for port in midi_in.ports() {
                if let Ok(name) = midi_in.port_name(&port) {
                    devices.push(name);
                }
            }
        }
        Err(e) => warn!("Unable to enumerate MIDI inputs: {}", e),
    }

    debug!("Found {} MIDI input port(s)", devices.len());
    devices
}
