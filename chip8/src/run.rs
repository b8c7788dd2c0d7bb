use anyhow::{Context, Result};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use emu8_core::{Chip8, Config, FrameClock, Renderer, Rom, Tone, FRAME_RATE};

use crate::audio::{Beeper, Mute};
use crate::keymap::keymap;

/// Front end settings that have no bearing on the machine itself.
pub struct Options {
    pub scale: u32,
    pub mute: bool,
}

pub fn run(config: Config, rom: &Rom, options: &Options) -> Result<()> {
    let mut chip8 = Chip8::new(config);
    chip8.load_rom(rom);

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, options.scale).map_err(anyhow::Error::msg)?;
    let mut speaker = speaker(&sdl, options.mute);
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let mut clock = FrameClock::new(FRAME_RATE);

    // Whether or not the frame rate should be respected
    let mut fast_forward = false;
    // Whether the game's state should be stepped forwards or backwards
    let mut rewind = false;

    info!(
        "running {} byte ROM at {} instructions per frame",
        rom.len(),
        config.instructions_per_frame()
    );

    'event: loop {
        // Handle input; this happens every frame even while waiting on a key
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_down(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_up(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            chip8.rewind_frame();
            display.render(chip8.frame());
            speaker.set_tone(false);
        } else {
            chip8
                .run_frame(&mut display, speaker.as_mut())
                .context("emulation stopped")?;
        }

        // Handle timing
        if fast_forward {
            clock.skip();
        } else {
            clock.wait();
        }
    }

    info!("window closed, shutting down");
    Ok(())
}

fn speaker(sdl: &sdl2::Sdl, mute: bool) -> Box<dyn Tone> {
    if mute {
        return Box::new(Mute);
    }
    match Beeper::new(sdl) {
        Ok(beeper) => Box::new(beeper),
        Err(e) => {
            warn!("audio unavailable, running muted: {}", e);
            Box::new(Mute)
        }
    }
}
