//! Built-in kits.

use super::{Kit, PadConfig, SoundParams};
use crate::voices::VoiceType;

use crate::dsp::oscillator::Waveform::{Sawtooth, Sine, Square, Triangle};
use crate::voices::VoiceType::{Clap, Hihat, Kick, Snare, Synth};

type PadRow<'a> = (&'a str, &'a str, VoiceType, SoundParams);

fn kit(name: &str, description: &str, bpm: u32, pads: [PadRow<'_>; 8]) -> Kit {
    let pads = pads
        .into_iter()
        .enumerate()
        .map(|(id, (label, color, voice, params))| {
            PadConfig::new(id as u8, label, color, voice, params)
        })
        .collect();

    Kit::from_parts(name.into(), description.into(), bpm, pads, None)
}

/// Standard electronic drum kit. The default.
pub fn neon_808() -> Kit {
    kit(
        "Neon 808",
        "Standard electronic drum kit",
        120,
        [
            ("KICK", "#ff0055", Kick, SoundParams::kick(150.0, 0.5, 100.0)),
            ("SNARE", "#00f3ff", Snare, SoundParams::noisy(200.0, 0.2, 0.8, 3000.0)),
            ("CLAP", "#ffea00", Clap, SoundParams::noisy(800.0, 0.15, 1.0, 1200.0)),
            ("CHAT", "#d600ff", Hihat, SoundParams::noisy(8000.0, 0.05, 1.0, 8000.0)),
            ("OHAT", "#9d4edd", Hihat, SoundParams::noisy(8000.0, 0.2, 1.0, 7000.0)),
            ("TOM L", "#00ff9d", Synth, SoundParams::tone(100.0, 0.3, Sine)),
            ("TOM H", "#00ff9d", Synth, SoundParams::tone(200.0, 0.3, Sine)),
            ("COWBELL", "#ff9100", Synth, SoundParams::tone(800.0, 0.1, Triangle)),
        ],
    )
}

pub fn techno_909() -> Kit {
    kit(
        "909 Techno",
        "Punchy techno drums",
        135,
        [
            ("KICK", "#ff2a6d", Kick, SoundParams::kick(100.0, 0.4, 50.0)),
            ("SNARE", "#05d9e8", Snare, SoundParams::noisy(250.0, 0.25, 0.6, 2000.0)),
            ("CLAP", "#ffc857", Clap, SoundParams::noisy(900.0, 0.2, 0.9, 1000.0)),
            ("OHAT", "#d200ff", Hihat, SoundParams::noisy(9000.0, 0.3, 0.9, 6000.0)),
            ("CHAT", "#e0aaff", Hihat, SoundParams::noisy(10000.0, 0.05, 1.0, 8000.0)),
            ("RIDE", "#00ffff", Synth, SoundParams::tone(5000.0, 0.8, Sawtooth)),
            ("RIM", "#00ff9d", Synth, SoundParams::tone(800.0, 0.05, Square)),
            ("CRASH", "#ff00cc", Synth, SoundParams::tone(400.0, 1.2, Sawtooth)),
        ],
    )
}

pub fn lofi_chill() -> Kit {
    kit(
        "Lo-Fi Chill",
        "Mellow and dusty",
        85,
        [
            ("KICK", "#7f1d1d", Kick, SoundParams::kick(60.0, 0.3, 20.0)),
            ("SNARE", "#1e3a8a", Snare, SoundParams::noisy(180.0, 0.15, 0.4, 800.0)),
            ("SNAP", "#713f12", Clap, SoundParams::noisy(1200.0, 0.05, 0.3, 2000.0)),
            ("HAT", "#581c87", Hihat, SoundParams::noisy(4000.0, 0.05, 0.7, 4000.0)),
            ("SHAKE", "#6b21a8", Hihat, SoundParams::noisy(6000.0, 0.1, 0.9, 5000.0)),
            ("VIBE", "#064e3b", Synth, SoundParams::tone(440.0, 0.6, Sine)),
            ("PERC", "#14532d", Synth, SoundParams::tone(880.0, 0.1, Triangle)),
            ("NOISE", "#831843", Synth, SoundParams::tone(200.0, 0.5, Square)),
        ],
    )
}

pub fn trap_hard() -> Kit {
    kit(
        "Trap Hard",
        "Heavy bass and fast hats",
        140,
        [
            ("808", "#dc2626", Kick, SoundParams::kick(45.0, 1.2, 50.0)),
            ("SNARE", "#2563eb", Snare, SoundParams::noisy(400.0, 0.15, 0.5, 2500.0)),
            ("CLAP", "#d97706", Clap, SoundParams::noisy(1000.0, 0.1, 0.9, 1500.0)),
            ("HAT 1", "#7c3aed", Hihat, SoundParams::noisy(9000.0, 0.03, 1.0, 8000.0)),
            ("HAT 2", "#9333ea", Hihat, SoundParams::noisy(8000.0, 0.06, 1.0, 7000.0)),
            ("CHANT", "#059669", Synth, SoundParams::tone(300.0, 0.2, Square)),
            ("FX", "#10b981", Synth, SoundParams::tone(1200.0, 0.3, Sawtooth)),
            ("BELL", "#db2777", Synth, SoundParams::tone(1500.0, 0.4, Sine)),
        ],
    )
}

pub fn synthwave() -> Kit {
    kit(
        "Synthwave",
        "Retro 80s futuristic",
        110,
        [
            ("KICK", "#b91c1c", Kick, SoundParams::kick(120.0, 0.6, 80.0)),
            ("GATE", "#1d4ed8", Snare, SoundParams::noisy(220.0, 0.4, 0.7, 1800.0)),
            ("CLAP", "#b45309", Clap, SoundParams::noisy(900.0, 0.25, 0.8, 1100.0)),
            ("HH CL", "#6d28d9", Hihat, SoundParams::noisy(7000.0, 0.1, 1.0, 6000.0)),
            ("HH OP", "#7e22ce", Hihat, SoundParams::noisy(6000.0, 0.4, 0.9, 5000.0)),
            ("TOM 1", "#047857", Synth, SoundParams::tone(150.0, 0.3, Triangle)),
            ("TOM 2", "#059669", Synth, SoundParams::tone(100.0, 0.3, Triangle)),
            ("LASER", "#be185d", Synth, SoundParams::tone(1000.0, 0.2, Sawtooth)),
        ],
    )
}

/// Every built-in kit, default first.
pub fn all() -> Vec<Kit> {
    vec![neon_808(), techno_909(), lofi_chill(), trap_hard(), synthwave()]
}

/// Look a built-in kit up by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<Kit> {
    all().into_iter().find(|kit| kit.name().eq_ignore_ascii_case(name))
}
