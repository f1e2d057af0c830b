use crate::error::Chip8Error;
use std::io;
use std::io::Read;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: u16 = 4096;

/// where the external loader puts the program
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// Flat 4K byte store, 0x000-0xfff. The low region holds interpreter data
/// (the font sprites); programs load at 0x200 and up. Every access is
/// bounds-checked: an address outside RAM is a `Chip8Error`, never a panic
/// and never a wrap.
pub struct Memory {
    bytes: Box<[u8; CHIP8_RAM_SIZE_BYTES as usize]>,
}

impl Memory {
    /// zero-filled RAM with the font baked in at 0x050
    pub fn new() -> Self {
        let mut m = Memory {
            bytes: Box::new([0u8; CHIP8_RAM_SIZE_BYTES as usize]),
        };
        let a = CHIP8_FONT_ADDR as usize;
        m.bytes[a..a + CHIP8_FONT.len()].copy_from_slice(&CHIP8_FONT);
        m
    }

    /// load a CHIP-8 program at 0x200
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<(), io::Error> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.write_slice(CHIP8_PROGRAM_ADDR, &buf)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "program too large for RAM"))
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8, Chip8Error> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::OutOfBoundsMemoryAccess(addr))
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), Chip8Error> {
        *self
            .bytes
            .get_mut(addr as usize)
            .ok_or(Chip8Error::OutOfBoundsMemoryAccess(addr))? = value;
        Ok(())
    }

    /// get a two-byte word, big-endian as the chip-8 stores opcodes
    pub fn read_word(&self, addr: u16) -> Result<u16, Chip8Error> {
        let hi = self.read_byte(addr)?;
        let lo = self.read_byte(addr.wrapping_add(1))?;
        Ok(((hi as u16) << 8) | lo as u16)
    }

    pub fn read_slice(&self, addr: u16, len: usize) -> Result<&[u8], Chip8Error> {
        let a = addr as usize;
        self.bytes
            .get(a..a + len)
            .ok_or(Chip8Error::OutOfBoundsMemoryAccess(addr))
    }

    pub fn write_slice(&mut self, addr: u16, data: &[u8]) -> Result<(), Chip8Error> {
        let a = addr as usize;
        self.bytes
            .get_mut(a..a + data.len())
            .ok_or(Chip8Error::OutOfBoundsMemoryAccess(addr))?
            .copy_from_slice(data);
        Ok(())
    }

    /// address of the 5-byte font sprite for a hex digit
    pub fn font_addr(digit: u8) -> u16 {
        CHIP8_FONT_ADDR + (digit & 0x0f) as u16 * CHIP8_FONT_GLYPH_BYTES
    }
}

const CHIP8_FONT_ADDR: u16 = 0x050;
const CHIP8_FONT_GLYPH_BYTES: u16 = 5;
const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
