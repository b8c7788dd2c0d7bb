use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use emu8_core::Tone;

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

/// A square wave oscillator fed to SDL2 on its audio thread.
pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl SquareWave {
    fn new(sample_rate: i32) -> Self {
        SquareWave {
            phase_inc: TONE_HZ / sample_rate as f32,
            phase: 0.0,
            volume: VOLUME,
        }
    }
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a 440Hz tone while the sound timer is running.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave::new(spec.freq))?;
        Ok(Beeper {
            device,
            playing: false,
        })
    }
}

impl Tone for Beeper {
    fn set_tone(&mut self, on: bool) {
        if on == self.playing {
            return;
        }
        if on {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = on;
    }
}

/// Silence, for `--mute` or machines without an audio device.
pub struct Mute;

impl Tone for Mute {
    fn set_tone(&mut self, _on: bool) {}
}
