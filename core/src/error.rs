/// Everything that can go wrong while loading or running a program
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("address {address:#06X} is outside of the {size} byte bus")]
    AddressOutOfRange { address: usize, size: usize },

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("stack underflow: returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("stack overflow: call depth would exceed {depth}")]
    StackOverflow { depth: usize },

    #[error("invalid program image: {reason}")]
    InvalidProgramImage { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Chip8Error {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        Chip8Error::InvalidProgramImage {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
