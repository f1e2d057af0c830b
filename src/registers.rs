use crate::error::Chip8Error;
use crate::memory::CHIP8_PROGRAM_ADDR;

/// index of the flags register; arithmetic, shifts and draws clobber it
pub const FLAGS: u8 = 0x0f;

/// The register file: `V0`-`VF` (8-bit), the index register `I` and the
/// program counter (both 16-bit). `VF` doubles as the carry/borrow/collision
/// flag, so programs shouldn't keep anything precious in it.
pub struct Registers {
    v: [u8; 16],
    pub i: u16,
    pub pc: u16,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: CHIP8_PROGRAM_ADDR,
        }
    }

    pub fn v(&self, index: u8) -> Result<u8, Chip8Error> {
        self.v
            .get(index as usize)
            .copied()
            .ok_or(Chip8Error::OutOfBoundsRegisterAccess(index))
    }

    pub fn set_v(&mut self, index: u8, value: u8) -> Result<(), Chip8Error> {
        *self
            .v
            .get_mut(index as usize)
            .ok_or(Chip8Error::OutOfBoundsRegisterAccess(index))? = value;
        Ok(())
    }

    pub fn set_flags(&mut self, value: u8) {
        self.v[FLAGS as usize] = value;
    }

    /// move past the current two-byte instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// move past the current instruction *and* the one after it
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(4);
    }
}
