//! CHIP-8 virtual machine core with a terminal front-end.
//!
//! ## Design
//!
//! * the core is a pure state-transition machine: `Chip8Interpreter::step`
//!   fetches, decodes and executes exactly one instruction and never does
//!   I/O, sleeps or draws
//! * everything around it is a collaborator behind a trait, so alternatives
//!   plug in: `Display` for renderers (TUI in-console to start with),
//!   `Input` for keypads, `Random` for the CXNN byte source
//! * the driving loop owns all timing: it runs a batch of instructions,
//!   ticks the two timers at 60Hz, pushes the key mask in and hands the
//!   framebuffer snapshot to the renderer
//! * all failure is typed (`Chip8Error`) and fatal to the instruction that
//!   raised it; the machine state is never left half-mutated, and the loop
//!   decides what to do next
//!
//! Model
//!
//! main
//!  |-- display, input, memory, random
//!  |-- interpreter(memory, random)
//!  |    |-- registers, call stack, framebuffer, timers
//!  |    `-- instruction decode + dispatch
//!  `-- main loop
//!       |-- interpreter.set_keys(input.key_mask())
//!       |-- interpreter.step() x instructions-per-frame
//!       |-- interpreter.tick_timers()
//!       |-- display.draw(interpreter.framebuffer())
//!       `-- sleep the rest of the 1/60s frame

pub mod display;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod random;
pub mod registers;
pub mod stack;
