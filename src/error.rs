/// Everything that can go wrong while executing a CHIP-8 instruction. The
/// core never recovers internally; every error is fatal to the current
/// instruction and bubbles up to the driving loop, which picks the policy
/// (halt, skip, whatever).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("unsupported opcode: {0:#06x}")]
    UnsupportedOpcode(u16),

    #[error("call stack overflow")]
    StackOverflow,

    #[error("call stack underflow (return without call)")]
    StackUnderflow,

    #[error("memory access out of bounds at {0:#05x}")]
    OutOfBoundsMemoryAccess(u16),

    #[error("register index out of bounds: V{0:X}")]
    OutOfBoundsRegisterAccess(u8),
}
