//! beatgrid - play a groove on the default output device and record it
//!
//! Run with: cargo run -- [seconds] [out.wav]

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result, WrapErr};
use env_logger::{Builder, Env};
use log::info;

use beatgrid::{kit::presets, DrumMachine, MachineConfig, TransportEvent};

const DEFAULT_SECONDS: f64 = 8.0;
const DEFAULT_OUT: &str = "beatgrid.wav";

fn setup_logger() {
    // Override with RUST_LOG, e.g. RUST_LOG=debug to see skipped triggers.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init()
        .unwrap_or(());
}

/// Stock groove over the first bar of the default kit.
fn program(machine: &mut DrumMachine) {
    let rows: [(usize, &[usize]); 5] = [
        (0, &[0, 4, 8, 12]),           // kick
        (1, &[4, 12]),                 // snare
        (2, &[12]),                    // clap
        (3, &[0, 2, 4, 6, 8, 10, 14]), // closed hat
        (4, &[15]),                    // open hat
    ];
    for (row, steps) in rows {
        for &step in steps {
            machine.toggle_step(row, step);
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    setup_logger();

    let mut args = std::env::args().skip(1);
    let seconds: f64 = match args.next() {
        Some(arg) => arg
            .parse()
            .wrap_err_with(|| format!("invalid duration {arg:?}"))?,
        None => DEFAULT_SECONDS,
    };
    let out = args.next().unwrap_or_else(|| DEFAULT_OUT.to_string());
    if !(seconds > 0.0) {
        return Err(eyre!("duration must be positive, got {seconds}"));
    }

    let config = MachineConfig {
        transport: beatgrid::TransportConfig {
            bars: 1,
            ..Default::default()
        },
        ..MachineConfig::default()
    };
    let max_take = config.max_take_seconds;
    let mut machine = DrumMachine::new(config);
    machine.select_kit(presets::neon_808());
    program(&mut machine);

    let events = machine.events();
    machine.arm_recording().wrap_err("could not arm the recorder")?;
    machine.start().wrap_err("could not start playback")?;
    info!("playing {} for {seconds:.1}s", machine.kit().name());

    let mut wav = None;
    while wav.is_none() && machine.recording_elapsed().unwrap_or(0.0) < seconds.min(max_take) {
        thread::sleep(Duration::from_millis(50));
        for event in events.try_iter() {
            if let TransportEvent::Step { step, .. } = event {
                if step % 4 == 0 {
                    log::debug!("beat {}", step / 4 + 1);
                }
            }
        }
        wav = machine.poll_recording()?;
    }

    machine.stop()?;
    let bytes = match wav {
        Some(bytes) => bytes,
        None => machine.disarm_recording()?,
    };
    std::fs::write(&out, &bytes).wrap_err_with(|| format!("failed to write {out}"))?;
    info!("wrote {} bytes to {out}", bytes.len());

    machine.shutdown();
    Ok(())
}
