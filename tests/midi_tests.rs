use pocket::midi::{MidiInput, MidiMessage, MockMidiInput, NoteEvent};
use pocket::transport::{NoPlayHead, TransportSnapshot};
use pocket::{BlockOutcome, PocketProcessor};
use std::time::Instant;

const MS_TOLERANCE: f64 = 1e-6;

fn prepared(sample_rate: f64) -> PocketProcessor {
    let mut processor = PocketProcessor::new();
    processor.prepare(sample_rate, 1_024).unwrap();
    processor
}

#[test]
fn test_processor_measures_raw_note_on() {
    let processor = prepared(48_000.0);
    let mut left = vec![0.25f32; 1_024];
    let mut right = vec![-0.25f32; 1_024];
    let mut channels = [left.as_mut_slice(), right.as_mut_slice()];
    let playhead = TransportSnapshot::playing(120.0, 16.0);

    let events = [
        NoteEvent::from_bytes(240, &[0x91, 38, 110]),
        NoteEvent::from_bytes(900, &[0x91, 38, 0]),
    ];
    let outcome = processor.process(&mut channels, 2, &events, Some(&playhead));

    assert!(matches!(outcome, Some(BlockOutcome::Published(_))));
    let snapshot = processor.shared_state().read();
    assert!((snapshot.deviation_ms - 5.0).abs() < MS_TOLERANCE);
    assert_eq!(snapshot.position_ppq, 16.0);
}

#[test]
fn test_audio_passes_through_and_extra_outputs_are_cleared() {
    let processor = prepared(44_100.0);
    let mut input = vec![0.5f32; 256];
    let mut extra = vec![0.9f32; 256];
    let mut channels = [input.as_mut_slice(), extra.as_mut_slice()];

    processor.process(&mut channels, 1, &[], Some(&NoPlayHead));

    assert!(input.iter().all(|&s| s == 0.5));
    assert!(extra.iter().all(|&s| s == 0.0));
}

#[test]
fn test_processor_without_playhead_reports_stopped() {
    let processor = prepared(44_100.0);
    processor.shared_state().write(3.0, 5.0);
    let mut mono = vec![0.0f32; 64];
    let mut channels = [mono.as_mut_slice()];

    let outcome = processor.process::<NoPlayHead>(&mut channels, 1, &[NoteEvent::note_on(0)], None);

    assert_eq!(outcome, Some(BlockOutcome::Stopped));
    assert_eq!(processor.shared_state().read().position_ppq, -1.0);
    assert_eq!(processor.shared_state().read().deviation_ms, 0.0);
}

#[test]
fn test_plugin_description() {
    let processor = PocketProcessor::new();
    assert_eq!(processor.name(), "Pocket");
    assert!(processor.accepts_midi());
    assert!(!processor.produces_midi());
    assert_eq!(processor.tail_length_seconds(), 0.0);
}

#[test]
fn test_mock_input_is_fifo() {
    let mut input = MockMidiInput::new();
    let now = Instant::now();
    input.push(now, &[0x90, 60, 100]);
    input.push(now, &[0x80, 60, 0]);
    assert_eq!(input.pending(), 2);

    let first = input.try_recv().unwrap();
    assert!(first.message().unwrap().is_note_on());
    let second = input.try_recv().unwrap();
    assert_eq!(
        second.message(),
        Some(MidiMessage::NoteOff {
            channel: 0,
            note: 60,
            velocity: 0
        })
    );
    assert!(input.try_recv().is_none());
}

#[test]
fn test_midi_message_equality() {
    assert_eq!(
        MidiMessage::NoteOn {
            channel: 0,
            note: 60,
            velocity: 100
        },
        MidiMessage::NoteOn {
            channel: 0,
            note: 60,
            velocity: 100
        }
    );
    assert_ne!(MidiMessage::Clock, MidiMessage::Start);
}
