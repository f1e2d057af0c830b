use crate::error::Chip8Error;

/// conventional depth on the COSMAC VIP interpreters
pub const CHIP8_STACK_DEPTH: usize = 16;

/// Bounded LIFO of return addresses. The original machine carved this out of
/// the penultimate page of RAM; here it's its own component, but the depth
/// limit stays and both overflow and underflow are hard errors.
pub struct CallStack {
    frames: Vec<u16>,
    limit: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: Vec::with_capacity(CHIP8_STACK_DEPTH),
            limit: CHIP8_STACK_DEPTH,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        if self.frames.len() >= self.limit {
            return Err(Chip8Error::StackOverflow);
        }
        self.frames.push(addr);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        self.frames.pop().ok_or(Chip8Error::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_round_trip() {
        let mut s = CallStack::new();
        s.push(0x234).unwrap();
        s.push(0x456).unwrap();
        assert_eq!(s.depth(), 2);
        assert_eq!(s.pop().unwrap(), 0x456);
        assert_eq!(s.pop().unwrap(), 0x234);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_underflow() {
        let mut s = CallStack::new();
        assert_eq!(s.pop(), Err(Chip8Error::StackUnderflow));
    }

    #[test]
    fn test_overflow_at_depth_16() {
        let mut s = CallStack::new();
        for n in 0..16 {
            s.push(0x200 + n).unwrap();
        }
        assert_eq!(s.push(0x300), Err(Chip8Error::StackOverflow));
        assert_eq!(s.depth(), 16);
    }
}
