use crate::error::Chip8Error;

/// One decoded CHIP-8 instruction. Operand conventions follow the usual
/// opcode field names: `x`/`y` are register indices from the second and
/// third nibbles, `n` the low nibble, `nn` the low byte, `nnn` the low
/// twelve bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: zero every pixel
    ClearDisplay,
    /// 00EE: pop the call stack into the program counter
    Return,
    /// 1NNN
    Jump { nnn: u16 },
    /// 2NNN
    Call { nnn: u16 },
    /// 3XNN: skip next instruction if VX == NN
    SkipEqImm { x: u8, nn: u8 },
    /// 4XNN: skip next instruction if VX != NN
    SkipNeImm { x: u8, nn: u8 },
    /// 5XY0: skip next instruction if VX == VY
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN: VX := NN
    SetImm { x: u8, nn: u8 },
    /// 7XNN: VX += NN, no carry flag
    AddImm { x: u8, nn: u8 },
    /// 8XY0: VX := VY
    Assign { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4: VX += VY, VF := carry
    AddReg { x: u8, y: u8 },
    /// 8XY5: VX -= VY, VF := not-borrow
    SubReg { x: u8, y: u8 },
    /// 8XY6: VF := low bit of VX, then VX >>= 1
    ShiftRight { x: u8 },
    /// 8XY7: VX -= VY, VF := 1 iff VY > VX before the subtraction
    SubBorrow { x: u8, y: u8 },
    /// 8XYE: VF := high bit of VX, then VX <<= 1
    ShiftLeft { x: u8 },
    /// 9XY0: skip next instruction if VX != VY
    SkipNeReg { x: u8, y: u8 },
    /// ANNN: I := NNN
    SetIndex { nnn: u16 },
    /// BNNN: jump to NNN + V0
    JumpV0 { nnn: u16 },
    /// CXNN: VX := random byte AND NN
    Random { x: u8, nn: u8 },
    /// DXYN: XOR-blit N sprite rows from I at (VX, VY), VF := collision
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E: skip next instruction if key VX is down
    SkipKeyPressed { x: u8 },
    /// EXA1: skip next instruction if key VX is up
    SkipKeyNotPressed { x: u8 },
    /// FX07: VX := delay timer
    ReadDelay { x: u8 },
    /// FX0A: halt until any key is down, VX := that key
    WaitKey { x: u8 },
    /// FX15: delay timer := VX
    SetDelay { x: u8 },
    /// FX18: sound timer := VX
    SetSound { x: u8 },
    /// FX1E: I += VX, no flag effect
    AddIndex { x: u8 },
    /// FX29: I := font sprite address for digit VX
    FontIndex { x: u8 },
    /// FX33: memory[I..I+3] := BCD digits of VX
    StoreBcd { x: u8 },
    /// FX55: memory[I..] := V0..VX inclusive
    StoreRegs { x: u8 },
    /// FX65: V0..VX inclusive := memory[I..]
    LoadRegs { x: u8 },
}

impl Instruction {
    /// Two-level decode: instruction family by the high nibble, then the low
    /// byte or low nibble for families 0x0, 0x8, 0xE and 0xF. Anything that
    /// doesn't match a defined form is an `UnsupportedOpcode`, including the
    /// 0NNN machine-code routines the original interpreter never emulated.
    pub fn decode(opcode: u16) -> Result<Instruction, Chip8Error> {
        use Instruction::*;

        let x = ((opcode >> 8) & 0x0f) as u8;
        let y = ((opcode >> 4) & 0x0f) as u8;
        let n = (opcode & 0x0f) as u8;
        let nn = (opcode & 0xff) as u8;
        let nnn = opcode & 0x0fff;

        match opcode >> 12 {
            0x0 => match opcode {
                0x00e0 => Ok(ClearDisplay),
                0x00ee => Ok(Return),
                _ => Err(Chip8Error::UnsupportedOpcode(opcode)),
            },
            0x1 => Ok(Jump { nnn }),
            0x2 => Ok(Call { nnn }),
            0x3 => Ok(SkipEqImm { x, nn }),
            0x4 => Ok(SkipNeImm { x, nn }),
            0x5 if n == 0 => Ok(SkipEqReg { x, y }),
            0x6 => Ok(SetImm { x, nn }),
            0x7 => Ok(AddImm { x, nn }),
            0x8 => match n {
                0x0 => Ok(Assign { x, y }),
                0x1 => Ok(Or { x, y }),
                0x2 => Ok(And { x, y }),
                0x3 => Ok(Xor { x, y }),
                0x4 => Ok(AddReg { x, y }),
                0x5 => Ok(SubReg { x, y }),
                0x6 => Ok(ShiftRight { x }),
                0x7 => Ok(SubBorrow { x, y }),
                0xe => Ok(ShiftLeft { x }),
                _ => Err(Chip8Error::UnsupportedOpcode(opcode)),
            },
            0x9 if n == 0 => Ok(SkipNeReg { x, y }),
            0xa => Ok(SetIndex { nnn }),
            0xb => Ok(JumpV0 { nnn }),
            0xc => Ok(Random { x, nn }),
            0xd => Ok(Draw { x, y, n }),
            0xe => match nn {
                0x9e => Ok(SkipKeyPressed { x }),
                0xa1 => Ok(SkipKeyNotPressed { x }),
                _ => Err(Chip8Error::UnsupportedOpcode(opcode)),
            },
            0xf => match nn {
                0x07 => Ok(ReadDelay { x }),
                0x0a => Ok(WaitKey { x }),
                0x15 => Ok(SetDelay { x }),
                0x18 => Ok(SetSound { x }),
                0x1e => Ok(AddIndex { x }),
                0x29 => Ok(FontIndex { x }),
                0x33 => Ok(StoreBcd { x }),
                0x55 => Ok(StoreRegs { x }),
                0x65 => Ok(LoadRegs { x }),
                _ => Err(Chip8Error::UnsupportedOpcode(opcode)),
            },
            _ => Err(Chip8Error::UnsupportedOpcode(opcode)),
        }
    }
}
