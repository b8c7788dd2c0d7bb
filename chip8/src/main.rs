use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::{error, LevelFilter};

use emu8_core::constants::DEFAULT_INSTRUCTIONS_PER_FRAME;
use emu8_core::{parse_font_base, Config, ConfigError, PcOverflowPolicy, Rom};

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A Chip-8 interpreter", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per 60Hz frame (1-20)
    #[arg(long, default_value_t = u32::from(DEFAULT_INSTRUCTIONS_PER_FRAME))]
    ipf: u32,

    /// Hex address the font sprites are loaded at, below 1B0
    #[arg(long, default_value = "050")]
    font_base: String,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=40))]
    scale: u32,

    /// Stop with an error when the program counter runs off the end of memory
    #[arg(long)]
    strict_pc: bool,

    /// Don't open an audio device
    #[arg(long)]
    mute: bool,

    /// Log more; repeat for more detail (-vvv traces every opcode)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Result<Config, ConfigError> {
        let font_base = parse_font_base(&self.font_base)?;
        let pc_policy = if self.strict_pc {
            PcOverflowPolicy::Fault
        } else {
            PcOverflowPolicy::Reset
        };
        Config::new(self.ipf, font_base, pc_policy)
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("emu8: {}", e);
            process::exit(2);
        }
    };

    let rom = match Rom::from_path(&args.rom) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("emu8: {}: {}", args.rom.display(), e);
            process::exit(2);
        }
    };

    let options = run::Options {
        scale: args.scale,
        mute: args.mute,
    };
    if let Err(e) = run::run(config, &rom, &options) {
        error!("{:#}", e);
        eprintln!("emu8: {:#}", e);
        process::exit(1);
    }
}
