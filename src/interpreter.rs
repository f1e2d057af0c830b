//! # interpreter
//!
//! The fetch/decode/execute core. One call to `step` reads the big-endian
//! instruction word at the program counter and applies its effect to the
//! registers, RAM, call stack, framebuffer and timers. There are no
//! suspension points and no I/O in here: the driving loop owns the cadence,
//! feeds in the key mask, ticks the timers at 60Hz and hands the
//! framebuffer snapshot to a renderer whenever it likes.
//!
//! Unless an instruction redirects control (jump, call, return, a taken
//! skip, or the key wait), the program counter advances by 2 after the
//! instruction's data effect. Every error leaves the whole machine exactly
//! as it was: bounds checks happen before any state is touched.

use crate::display::Framebuffer;
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::random::{Random, ThreadRandom};
use crate::registers::Registers;
use crate::stack::CallStack;
use std::io;

/// where the program counter goes next, decided by the executed instruction
enum Flow {
    /// past this instruction
    Advance,
    /// past this instruction and the next one
    Skip,
    /// somewhere else entirely
    Jump(u16),
    /// nowhere; re-run this instruction next cycle (key wait)
    Stay,
}

pub struct Chip8Interpreter {
    memory: Memory,
    registers: Registers,
    stack: CallStack,
    framebuffer: Framebuffer,
    delay_timer: u8,
    sound_timer: u8,
    keys: u16,
    random: Box<dyn Random>,
}

impl Chip8Interpreter {
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom::new()))
    }

    /// build with a caller-supplied byte source, so tests can pin CXNN
    pub fn with_random(random: Box<dyn Random>) -> Self {
        Chip8Interpreter {
            memory: Memory::new(),
            registers: Registers::new(),
            stack: CallStack::new(),
            framebuffer: Framebuffer::new(),
            delay_timer: 0,
            sound_timer: 0,
            keys: 0,
            random,
        }
    }

    /// load a chip8 program at 0x200
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<(), io::Error> {
        self.memory.load_program(reader)
    }

    /// the external input source writes the key mask; we only read it
    pub fn set_keys(&mut self, mask: u16) {
        self.keys = mask;
    }

    /// snapshot for the renderer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// decrement both timers; the driving loop calls this at 60Hz, between
    /// instructions, never during one
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// fetch the word at the program counter and execute it
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let opcode = self.memory.read_word(self.registers.pc)?;
        self.execute(opcode)
    }

    /// decode and execute a single instruction word
    pub fn execute(&mut self, opcode: u16) -> Result<(), Chip8Error> {
        let flow = self.dispatch(Instruction::decode(opcode)?)?;
        match flow {
            Flow::Advance => self.registers.advance(),
            Flow::Skip => self.registers.skip(),
            Flow::Jump(addr) => self.registers.pc = addr,
            Flow::Stay => (),
        }
        Ok(())
    }

    fn dispatch(&mut self, instruction: Instruction) -> Result<Flow, Chip8Error> {
        use Instruction::*;

        let flow = match instruction {
            ClearDisplay => {
                self.framebuffer.clear();
                Flow::Advance
            }
            Return => Flow::Jump(self.stack.pop()?),
            Jump { nnn } => Flow::Jump(nnn),
            Call { nnn } => {
                // the return address, not the call site
                self.stack.push(self.registers.pc.wrapping_add(2))?;
                Flow::Jump(nnn)
            }
            SkipEqImm { x, nn } => self.skip_if(self.registers.v(x)? == nn),
            SkipNeImm { x, nn } => self.skip_if(self.registers.v(x)? != nn),
            SkipEqReg { x, y } => self.skip_if(self.registers.v(x)? == self.registers.v(y)?),
            SkipNeReg { x, y } => self.skip_if(self.registers.v(x)? != self.registers.v(y)?),
            SetImm { x, nn } => {
                self.registers.set_v(x, nn)?;
                Flow::Advance
            }
            AddImm { x, nn } => {
                let sum = self.registers.v(x)?.wrapping_add(nn);
                self.registers.set_v(x, sum)?;
                Flow::Advance
            }
            Assign { x, y } => {
                let value = self.registers.v(y)?;
                self.registers.set_v(x, value)?;
                Flow::Advance
            }
            Or { x, y } => self.alu(x, y, |a, b| a | b)?,
            And { x, y } => self.alu(x, y, |a, b| a & b)?,
            Xor { x, y } => self.alu(x, y, |a, b| a ^ b)?,
            AddReg { x, y } => {
                let (sum, carry) = self.registers.v(x)?.overflowing_add(self.registers.v(y)?);
                self.registers.set_v(x, sum)?;
                self.registers.set_flags(carry as u8);
                Flow::Advance
            }
            SubReg { x, y } => {
                let (diff, borrow) = self.registers.v(x)?.overflowing_sub(self.registers.v(y)?);
                self.registers.set_v(x, diff)?;
                self.registers.set_flags(!borrow as u8);
                Flow::Advance
            }
            SubBorrow { x, y } => {
                // same subtraction as sub-op 5, but the flag reports a
                // strict borrow rather than its absence
                let vx = self.registers.v(x)?;
                let vy = self.registers.v(y)?;
                self.registers.set_v(x, vx.wrapping_sub(vy))?;
                self.registers.set_flags((vy > vx) as u8);
                Flow::Advance
            }
            ShiftRight { x } => {
                let value = self.registers.v(x)?;
                self.registers.set_v(x, value >> 1)?;
                self.registers.set_flags(value & 1);
                Flow::Advance
            }
            ShiftLeft { x } => {
                let value = self.registers.v(x)?;
                self.registers.set_v(x, value << 1)?;
                self.registers.set_flags(value >> 7);
                Flow::Advance
            }
            SetIndex { nnn } => {
                self.registers.i = nnn;
                Flow::Advance
            }
            JumpV0 { nnn } => Flow::Jump(nnn.wrapping_add(self.registers.v(0)? as u16)),
            Random { x, nn } => {
                let byte = self.random.next_byte() & nn;
                self.registers.set_v(x, byte)?;
                Flow::Advance
            }
            Draw { x, y, n } => {
                let ox = self.registers.v(x)?;
                let oy = self.registers.v(y)?;
                // sprite rows are fetched (and bounds-checked) in full
                // before the first pixel flips
                let rows = self.memory.read_slice(self.registers.i, n as usize)?.to_vec();
                let collision = self.framebuffer.blit_sprite(ox, oy, &rows);
                self.registers.set_flags(collision as u8);
                Flow::Advance
            }
            SkipKeyPressed { x } => {
                let key = self.registers.v(x)? & 0x0f;
                self.skip_if(self.keys >> key & 1 == 1)
            }
            SkipKeyNotPressed { x } => {
                let key = self.registers.v(x)? & 0x0f;
                self.skip_if(self.keys >> key & 1 == 0)
            }
            ReadDelay { x } => {
                self.registers.set_v(x, self.delay_timer)?;
                Flow::Advance
            }
            WaitKey { x } => {
                // polled wait: stay put until the input source reports a key
                if self.keys == 0 {
                    Flow::Stay
                } else {
                    self.registers.set_v(x, self.keys.trailing_zeros() as u8)?;
                    Flow::Advance
                }
            }
            SetDelay { x } => {
                self.delay_timer = self.registers.v(x)?;
                Flow::Advance
            }
            SetSound { x } => {
                self.sound_timer = self.registers.v(x)?;
                Flow::Advance
            }
            AddIndex { x } => {
                self.registers.i = self.registers.i.wrapping_add(self.registers.v(x)? as u16);
                Flow::Advance
            }
            FontIndex { x } => {
                self.registers.i = Memory::font_addr(self.registers.v(x)?);
                Flow::Advance
            }
            StoreBcd { x } => {
                let value = self.registers.v(x)?;
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.memory.write_slice(self.registers.i, &digits)?;
                Flow::Advance
            }
            StoreRegs { x } => {
                let mut values = Vec::with_capacity(x as usize + 1);
                for index in 0..=x {
                    values.push(self.registers.v(index)?);
                }
                self.memory.write_slice(self.registers.i, &values)?;
                Flow::Advance
            }
            LoadRegs { x } => {
                let values = self
                    .memory
                    .read_slice(self.registers.i, x as usize + 1)?
                    .to_vec();
                for (index, value) in values.into_iter().enumerate() {
                    self.registers.set_v(index as u8, value)?;
                }
                Flow::Advance
            }
        };
        Ok(flow)
    }

    fn skip_if(&self, condition: bool) -> Flow {
        if condition {
            Flow::Skip
        } else {
            Flow::Advance
        }
    }

    fn alu(&mut self, x: u8, y: u8, op: impl Fn(u8, u8) -> u8) -> Result<Flow, Chip8Error> {
        let result = op(self.registers.v(x)?, self.registers.v(y)?);
        self.registers.set_v(x, result)?;
        Ok(Flow::Advance)
    }
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::CHIP8_PROGRAM_ADDR;
    use crate::random::FixedRandom;

    fn machine() -> Chip8Interpreter {
        Chip8Interpreter::with_random(Box::new(FixedRandom::new(&[0xff])))
    }

    #[test]
    fn test_set_imm() {
        let mut m = machine();
        m.execute(0x60ab).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0xab);
        assert_eq!(m.registers.pc, 0x202);
    }

    #[test]
    fn test_add_imm_wraps_without_flag() {
        let mut m = machine();
        m.execute(0x60ff).unwrap();
        m.execute(0x7002).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0x01);
        // 7XNN touches no flag
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
        assert_eq!(m.registers.pc, 0x204);
    }

    #[test]
    fn test_assign_or_and_xor() {
        let mut m = machine();
        m.registers.set_v(0, 0b1100).unwrap();
        m.registers.set_v(1, 0b1010).unwrap();
        m.execute(0x8211).unwrap(); // V2 = V2 | V1
        assert_eq!(m.registers.v(2).unwrap(), 0b1010);
        m.execute(0x8012).unwrap(); // V0 &= V1
        assert_eq!(m.registers.v(0).unwrap(), 0b1000);
        m.execute(0x8013).unwrap(); // V0 ^= V1
        assert_eq!(m.registers.v(0).unwrap(), 0b0010);
        m.execute(0x8300).unwrap(); // V3 = V0
        assert_eq!(m.registers.v(3).unwrap(), 0b0010);
    }

    #[test]
    fn test_add_reg_with_carry() {
        let mut m = machine();
        m.registers.set_v(0, 0xff).unwrap();
        m.registers.set_v(1, 0x01).unwrap();
        m.execute(0x8014).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0x00);
        assert_eq!(m.registers.v(0xf).unwrap(), 1);
    }

    #[test]
    fn test_add_reg_without_carry() {
        let mut m = machine();
        m.registers.set_v(0, 0x01).unwrap();
        m.registers.set_v(1, 0x01).unwrap();
        m.registers.set_flags(1); // stale flag must be cleared
        m.execute(0x8014).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0x02);
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
    }

    #[test]
    fn test_sub_reg_not_borrow() {
        let mut m = machine();
        m.registers.set_v(0, 0x05).unwrap();
        m.registers.set_v(1, 0x03).unwrap();
        m.execute(0x8015).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0x02);
        assert_eq!(m.registers.v(0xf).unwrap(), 1);
    }

    #[test]
    fn test_sub_reg_with_borrow() {
        let mut m = machine();
        m.registers.set_v(0, 0x01).unwrap();
        m.registers.set_v(1, 0x03).unwrap();
        m.execute(0x8015).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0xfe);
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
    }

    #[test]
    fn test_sub_borrow_variant() {
        let mut m = machine();
        m.registers.set_v(0, 0x05).unwrap();
        m.registers.set_v(1, 0x03).unwrap();
        m.execute(0x8017).unwrap(); // V0 -= V1, VF := 1 iff V1 > V0
        assert_eq!(m.registers.v(0).unwrap(), 0x02);
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
    }

    #[test]
    fn test_sub_borrow_variant_flag_on_borrow() {
        let mut m = machine();
        m.registers.set_v(0, 0x03).unwrap();
        m.registers.set_v(1, 0x05).unwrap();
        m.execute(0x8017).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0xfe);
        assert_eq!(m.registers.v(0xf).unwrap(), 1);
    }

    #[test]
    fn test_sub_borrow_variant_equal_values_no_flag() {
        let mut m = machine();
        m.registers.set_v(0, 0x07).unwrap();
        m.registers.set_v(1, 0x07).unwrap();
        m.execute(0x8017).unwrap();
        // the borrow test is strict: equality leaves the flag clear
        assert_eq!(m.registers.v(0).unwrap(), 0x00);
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
    }

    #[test]
    fn test_shift_right_flag_from_old_low_bit() {
        let mut m = machine();
        m.registers.set_v(0, 0b0000_0101).unwrap();
        m.execute(0x8016).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0b0000_0010);
        assert_eq!(m.registers.v(0xf).unwrap(), 1);
    }

    #[test]
    fn test_shift_left_flag_from_old_high_bit() {
        let mut m = machine();
        m.registers.set_v(0, 0b1000_0001).unwrap();
        m.execute(0x801e).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0b0000_0010);
        assert_eq!(m.registers.v(0xf).unwrap(), 1);
    }

    #[test]
    fn test_jump() {
        let mut m = machine();
        m.execute(0x1abc).unwrap();
        assert_eq!(m.registers.pc, 0xabc);
    }

    #[test]
    fn test_jump_v0() {
        let mut m = machine();
        m.registers.set_v(0, 0x10).unwrap();
        m.execute(0xb200).unwrap();
        assert_eq!(m.registers.pc, 0x210);
    }

    #[test]
    fn test_call_return_round_trip() {
        let mut m = machine();
        m.execute(0x2400).unwrap();
        assert_eq!(m.registers.pc, 0x400);
        assert_eq!(m.stack.depth(), 1);
        m.execute(0x00ee).unwrap();
        // back just past the call site
        assert_eq!(m.registers.pc, CHIP8_PROGRAM_ADDR + 2);
        assert_eq!(m.stack.depth(), 0);
    }

    #[test]
    fn test_return_underflow_leaves_state() {
        let mut m = machine();
        assert_eq!(m.execute(0x00ee), Err(Chip8Error::StackUnderflow));
        assert_eq!(m.registers.pc, CHIP8_PROGRAM_ADDR);
    }

    #[test]
    fn test_call_overflow_at_depth_16() {
        let mut m = machine();
        for _ in 0..16 {
            m.execute(0x2400).unwrap();
        }
        let pc_before = m.registers.pc;
        assert_eq!(m.execute(0x2400), Err(Chip8Error::StackOverflow));
        assert_eq!(m.registers.pc, pc_before);
        assert_eq!(m.stack.depth(), 16);
    }

    #[test]
    fn test_skip_eq_imm() {
        let mut m = machine();
        m.registers.set_v(5, 0x42).unwrap();
        m.execute(0x3542).unwrap();
        assert_eq!(m.registers.pc, 0x204); // taken
        m.execute(0x3543).unwrap();
        assert_eq!(m.registers.pc, 0x206); // not taken
    }

    #[test]
    fn test_skip_ne_imm() {
        let mut m = machine();
        m.registers.set_v(5, 0x42).unwrap();
        m.execute(0x4542).unwrap();
        assert_eq!(m.registers.pc, 0x202); // not taken
        m.execute(0x4543).unwrap();
        assert_eq!(m.registers.pc, 0x206); // taken
    }

    #[test]
    fn test_skip_reg_forms() {
        let mut m = machine();
        m.registers.set_v(1, 7).unwrap();
        m.registers.set_v(2, 7).unwrap();
        m.execute(0x5120).unwrap();
        assert_eq!(m.registers.pc, 0x204); // equal, taken
        m.execute(0x9120).unwrap();
        assert_eq!(m.registers.pc, 0x206); // equal, not taken
        m.registers.set_v(2, 8).unwrap();
        m.execute(0x9120).unwrap();
        assert_eq!(m.registers.pc, 0x20a); // unequal, taken
    }

    #[test]
    fn test_set_index() {
        let mut m = machine();
        m.execute(0xa123).unwrap();
        assert_eq!(m.registers.i, 0x123);
        assert_eq!(m.registers.pc, 0x202);
    }

    #[test]
    fn test_random_masks_with_nn() {
        let mut m = Chip8Interpreter::with_random(Box::new(FixedRandom::new(&[0b1111_0101])));
        m.execute(0xc00f).unwrap();
        assert_eq!(m.registers.v(0).unwrap(), 0b0000_0101);
    }

    #[test]
    fn test_clear_display() {
        let mut m = machine();
        m.execute(0x00e0).unwrap();
        assert!(m.framebuffer.is_blank()); // clearing blank is a no-op
        m.registers.i = Memory::font_addr(0);
        m.execute(0xd005).unwrap();
        assert!(!m.framebuffer.is_blank());
        m.execute(0x00e0).unwrap();
        assert!(m.framebuffer.is_blank());
    }

    #[test]
    fn test_draw_font_sprite_no_collision() {
        let mut m = machine();
        m.registers.i = Memory::font_addr(0);
        m.execute(0xd015).unwrap(); // 5 rows of the "0" glyph at (0, 0)
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
        // 0xF0 top row: four pixels on
        assert!(m.framebuffer().pixel(0, 0));
        assert!(m.framebuffer().pixel(3, 0));
        assert!(!m.framebuffer().pixel(4, 0));
    }

    #[test]
    fn test_draw_twice_collides_and_erases() {
        let mut m = machine();
        m.registers.i = Memory::font_addr(7);
        m.execute(0xd015).unwrap();
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
        m.execute(0xd015).unwrap();
        assert_eq!(m.registers.v(0xf).unwrap(), 1);
        assert!(m.framebuffer.is_blank());
    }

    #[test]
    fn test_draw_out_of_bounds_sprite_data() {
        let mut m = machine();
        m.registers.i = 0x0fff;
        let err = m.execute(0xd002);
        assert_eq!(err, Err(Chip8Error::OutOfBoundsMemoryAccess(0x0fff)));
        // nothing was drawn, nothing moved
        assert!(m.framebuffer.is_blank());
        assert_eq!(m.registers.pc, CHIP8_PROGRAM_ADDR);
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
    }

    #[test]
    fn test_skip_key_pressed() {
        let mut m = machine();
        m.registers.set_v(0, 0x5).unwrap();
        m.execute(0xe09e).unwrap();
        assert_eq!(m.registers.pc, 0x202); // key up, not taken
        m.set_keys(1 << 5);
        m.execute(0xe09e).unwrap();
        assert_eq!(m.registers.pc, 0x206); // key down, taken
    }

    #[test]
    fn test_skip_key_not_pressed() {
        let mut m = machine();
        m.registers.set_v(0, 0x5).unwrap();
        m.execute(0xe0a1).unwrap();
        assert_eq!(m.registers.pc, 0x204); // key up, taken
        m.set_keys(1 << 5);
        m.execute(0xe0a1).unwrap();
        assert_eq!(m.registers.pc, 0x206); // key down, not taken
    }

    #[test]
    fn test_wait_key_polls_until_pressed() {
        let mut m = machine();
        m.execute(0xf00a).unwrap();
        m.execute(0xf00a).unwrap();
        // no key yet: the pc doesn't move, the driver just keeps re-running
        assert_eq!(m.registers.pc, CHIP8_PROGRAM_ADDR);
        m.set_keys(0b0000_0000_1100_0000);
        m.execute(0xf00a).unwrap();
        // lowest set bit wins
        assert_eq!(m.registers.v(0).unwrap(), 6);
        assert_eq!(m.registers.pc, 0x202);
    }

    #[test]
    fn test_delay_timer_round_trip() {
        let mut m = machine();
        m.registers.set_v(3, 42).unwrap();
        m.execute(0xf315).unwrap(); // delay = V3
        m.tick_timers();
        m.execute(0xf007).unwrap(); // V0 = delay
        assert_eq!(m.registers.v(0).unwrap(), 41);
    }

    #[test]
    fn test_sound_timer_set() {
        let mut m = machine();
        m.registers.set_v(1, 2).unwrap();
        m.execute(0xf118).unwrap();
        assert_eq!(m.sound_timer, 2);
    }

    #[test]
    fn test_timers_saturate_at_zero() {
        let mut m = machine();
        m.tick_timers();
        m.tick_timers();
        assert_eq!(m.delay_timer, 0);
        assert_eq!(m.sound_timer, 0);
    }

    #[test]
    fn test_add_index() {
        let mut m = machine();
        m.registers.i = 0x100;
        m.registers.set_v(0, 0x20).unwrap();
        m.execute(0xf01e).unwrap();
        assert_eq!(m.registers.i, 0x120);
        // no flag effect
        assert_eq!(m.registers.v(0xf).unwrap(), 0);
    }

    #[test]
    fn test_font_index() {
        let mut m = machine();
        m.registers.set_v(2, 0xa).unwrap();
        m.execute(0xf229).unwrap();
        assert_eq!(m.registers.i, Memory::font_addr(0xa));
    }

    #[test]
    fn test_store_bcd() {
        let mut m = machine();
        m.registers.set_v(4, 159).unwrap();
        m.registers.i = 0x300;
        m.execute(0xf433).unwrap();
        assert_eq!(m.memory.read_slice(0x300, 3).unwrap(), &[1, 5, 9]);
    }

    #[test]
    fn test_store_and_load_regs() {
        let mut m = machine();
        for n in 0..=3 {
            m.registers.set_v(n, n * 11).unwrap();
        }
        m.registers.i = 0x300;
        m.execute(0xf355).unwrap(); // dump V0..V3
        assert_eq!(m.memory.read_slice(0x300, 4).unwrap(), &[0, 11, 22, 33]);
        // only x+1 bytes written
        assert_eq!(m.memory.read_byte(0x304).unwrap(), 0);
        // I is unchanged
        assert_eq!(m.registers.i, 0x300);

        let mut m2 = machine();
        m2.memory.write_slice(0x300, &[9, 8, 7]).unwrap();
        m2.registers.i = 0x300;
        m2.execute(0xf265).unwrap(); // load V0..V2
        assert_eq!(m2.registers.v(0).unwrap(), 9);
        assert_eq!(m2.registers.v(1).unwrap(), 8);
        assert_eq!(m2.registers.v(2).unwrap(), 7);
        assert_eq!(m2.registers.v(3).unwrap(), 0);
    }

    #[test]
    fn test_store_regs_out_of_bounds_is_atomic() {
        let mut m = machine();
        m.registers.i = 0x0ffe;
        assert_eq!(
            m.execute(0xf355),
            Err(Chip8Error::OutOfBoundsMemoryAccess(0x0ffe))
        );
        assert_eq!(m.memory.read_slice(0x0ffe, 2).unwrap(), &[0, 0]);
        assert_eq!(m.registers.pc, CHIP8_PROGRAM_ADDR);
    }

    #[test]
    fn test_unsupported_opcode_leaves_state() {
        let mut m = machine();
        for bad in [0xffffu16, 0x0123, 0xe101, 0x812a] {
            assert_eq!(m.execute(bad), Err(Chip8Error::UnsupportedOpcode(bad)));
        }
        assert_eq!(m.registers.pc, CHIP8_PROGRAM_ADDR);
        assert!(m.framebuffer.is_blank());
    }

    #[test]
    fn test_step_fetches_big_endian() {
        let mut m = machine();
        let mut prog: &[u8] = &[0x6a, 0x42]; // V10 = 0x42
        m.load_program(&mut prog).unwrap();
        m.step().unwrap();
        assert_eq!(m.registers.v(0xa).unwrap(), 0x42);
        assert_eq!(m.registers.pc, 0x202);
    }

    #[test]
    fn test_step_with_pc_at_ram_edge() {
        let mut m = machine();
        m.registers.pc = 0x0fff;
        assert_eq!(m.step(), Err(Chip8Error::OutOfBoundsMemoryAccess(0x1000)));
    }

    #[test]
    fn test_step_runs_a_small_program() {
        let mut m = machine();
        // V0 = 5; V1 = 3; V0 += V1; jump back over the add
        let mut prog: &[u8] = &[0x60, 0x05, 0x61, 0x03, 0x80, 0x14, 0x12, 0x04];
        m.load_program(&mut prog).unwrap();
        for _ in 0..4 {
            m.step().unwrap();
        }
        assert_eq!(m.registers.v(0).unwrap(), 8);
        assert_eq!(m.registers.pc, 0x204);
    }
}
