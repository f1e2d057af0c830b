use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// map of keyboard characters to chip-8 keypad codes, using the left-hand
/// side of a qwerty keyboard to mimic the 4x4 hex pad
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// Samples the 16-key pad. The interpreter only ever sees the 16-bit mask;
/// how keys are collected (and when they count as released) is this side's
/// business.
pub trait Input {
    /// mask of the keys pressed since the last flush, one bit per key code
    fn key_mask(&mut self) -> Result<u16, io::Error>;

    /// forget all buffered keypresses
    fn flush_keys(&mut self) -> Result<(), io::Error>;

    /// whether the user asked to leave the emulator
    fn quit_requested(&self) -> bool {
        false
    }
}

/// simple implementation of Input, using STDIN. terminal keyboards have no
/// key-up events, so a key counts as held until the driver's next flush.
/// puts the terminal into raw mode for its own lifetime (harmless if a
/// terminal renderer already did), since a cooked terminal would sit on
/// keypresses until Enter
pub struct StdinInput {
    buffer: Vec<u8>,
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl StdinInput {
    pub fn new() -> Self {
        terminal::enable_raw_mode().unwrap();
        StdinInput {
            buffer: Vec::new(),
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            quit: false,
        }
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                match evt.code {
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(mapped_key) => self.buffer.push(*mapped_key),
                        None => {
                            eprintln!("Warning: can't map {:?} to a COSMAC key", key);
                        }
                    },
                    KeyCode::Esc => self.quit = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn key_mask(&mut self) -> Result<u16, io::Error> {
        self.read_stdin()?;
        Ok(self
            .buffer
            .iter()
            .fold(0u16, |mask, key| mask | 1 << (key & 0x0f)))
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.read_stdin()?;
        self.buffer.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    keys: Vec<u8>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            keys: Vec::from(keys),
        }
    }
}

impl Input for DummyInput {
    fn key_mask(&mut self) -> Result<u16, io::Error> {
        Ok(self
            .keys
            .iter()
            .fold(0u16, |mask, key| mask | 1 << (key & 0x0f)))
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.keys.clear();
        Ok(())
    }
}
