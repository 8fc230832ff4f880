use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Select};
use pocket::{
    cli::{describe_missing_device, validate_device, Args},
    config::Settings,
    create_scheduler,
    host::{EventSource, HostHandle, HostSimulator, MidiInputSource},
    logging,
    midi::MidirInput,
    performer::Performer,
    ui::{ConsoleDisplay, Display, LogDisplay},
    InternalTransport, PocketProcessor, Scheduler,
};
use std::sync::Arc;
use std::{thread, time::Duration};

fn main() {
    let args = parse_command_line_arguments();
    initialize_logging(args.verbose);
    let devices = get_available_devices();

    if args.device_list {
        list_available_devices(&devices);
        return;
    }

    let mut settings = match Settings::load(&args) {
        Ok(settings) => settings,
        Err(e) => exit_with_error(&e.to_string()),
    };

    if args.choose_device {
        settings.device = choose_device(&devices);
    }

    if let Some(device_name) = &settings.device {
        if validate_device(device_name, &devices).is_err() {
            exit_with_error(&describe_missing_device(device_name, &devices));
        }
    }

    if let Err(e) = run(&settings) {
        exit_with_error(&format!("Error running Pocket: {}", e));
    }
}

fn exit_with_error(error_msg: &str) -> ! {
    log::error!("{}", error_msg);
    eprintln!("{}", error_msg);
    std::process::exit(1);
}

fn initialize_logging(to_terminal: bool) {
    if let Err(e) = logging::init_logger(to_terminal) {
        eprintln!("Logging disabled: {}", e);
    }
    log::info!("Application starting");
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn get_available_devices() -> Vec<String> {
    pocket::handle_device_list()
}

fn list_available_devices(devices: &[String]) {
    println!("Available MIDI devices:");
    for device in devices {
        println!("  - {}", device);
    }
}

fn choose_device(devices: &[String]) -> Option<String> {
    if devices.is_empty() {
        println!("No MIDI input devices found; using the built-in performer");
        return None;
    }

    match Select::with_theme(&ColorfulTheme::default())
        .with_prompt("MIDI input device")
        .items(devices)
        .default(0)
        .interact_opt()
    {
        Ok(Some(index)) => Some(devices[index].clone()),
        Ok(None) => None,
        Err(e) => {
            log::warn!("Device selection failed: {}", e);
            None
        }
    }
}

fn run(settings: &Settings) -> pocket::Result<()> {
    if settings.headless {
        run_with_display(settings, LogDisplay::new())
    } else {
        run_with_display(settings, ConsoleDisplay::new())
    }
}

fn run_with_display<D>(settings: &Settings, display: D) -> pocket::Result<()>
where
    D: Display + Send + 'static,
{
    let scheduler = create_scheduler();
    let transport = Arc::new(InternalTransport::new(settings.bpm, settings.start_ppq));
    transport.set_playing(true);

    let processor = PocketProcessor::new();
    // Dropping the handle stops the UI loop
    let editor = processor.create_editor(&scheduler, display, settings.refresh_hz)?;

    let mut host = match &settings.device {
        Some(device_name) => {
            let input = MidirInput::connect(device_name)?;
            log::info!("Successfully connected to MIDI device: {}", input.port_name());
            println!("Listening to {}", input.port_name());
            start_audio(&scheduler, processor, transport, MidiInputSource::new(input), settings)?
        }
        None => {
            let performer = Performer::new(settings.humanize_ms, settings.every_n_beats);
            start_audio(&scheduler, processor, transport, performer, settings)?
        }
    };

    run_application_loop(settings.duration_secs);

    if let Some(stats) = host.stop() {
        log::info!(
            "Processed {} blocks, {} with a new reading, {} overrun(s)",
            stats.blocks,
            stats.published,
            stats.overruns
        );
    }
    drop(editor);
    log::info!("Application stopped");
    Ok(())
}

fn start_audio<S, E>(
    scheduler: &S,
    processor: PocketProcessor,
    transport: Arc<InternalTransport>,
    source: E,
    settings: &Settings,
) -> pocket::Result<HostHandle>
where
    S: Scheduler,
    E: EventSource + 'static,
{
    let host = HostSimulator::new(
        processor,
        transport,
        source,
        settings.sample_rate,
        settings.block_size,
    )?;
    HostHandle::spawn(scheduler, host)
}

fn run_application_loop(duration_secs: Option<f64>) {
    match duration_secs {
        Some(seconds) => {
            log::info!("Running for {} s", seconds);
            thread::sleep(Duration::from_secs_f64(seconds));
        }
        None => {
            log::info!("Application running. Press Ctrl+C to exit...");
            println!("\nPress Ctrl+C to exit...");
            loop {
                thread::sleep(Duration::from_secs(1));
            }
        }
    }
}
