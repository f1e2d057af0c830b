use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use chip8::display::{Display, MonoTermDisplay, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8::input::{Input, StdinInput};
use chip8::interpreter::Chip8Interpreter;

/// 60Hz: the cadence for timer ticks and display refresh
const FRAME: Duration = Duration::from_nanos(16_666_667);

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Params {
    /// path to a CHIP-8 ROM image
    rom: PathBuf,

    /// instructions executed per 60Hz frame
    #[arg(long, default_value_t = 11)]
    speed: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let params = Params::parse();

    let mut display = MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)?;
    let mut input = StdinInput::new();
    let mut interpreter = Chip8Interpreter::new();

    let mut f = File::open(&params.rom)?;
    interpreter.load_program(&mut f)?;

    // instructions run as fast as possible, then we sleep off the rest of
    // the frame; spin_sleep keeps the 60Hz cadence honest
    let sleeper = spin_sleep::SpinSleeper::default();
    loop {
        let frame_start = Instant::now();

        interpreter.set_keys(input.key_mask()?);
        if input.quit_requested() {
            break;
        }

        // any error out of the core is fatal: log-and-halt is the policy here
        for _ in 0..params.speed {
            interpreter.step()?;
        }

        interpreter.tick_timers();
        display.draw(interpreter.framebuffer().as_bytes())?;
        input.flush_keys()?;

        sleeper.sleep(FRAME.saturating_sub(frame_start.elapsed()));
    }

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
