use core::fmt;

/// CPU traps the kernel cannot resume from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalTrap {
    Reset,
    UndefinedInstruction,
    SoftwareInterrupt,
    PrefetchAbort,
    DataAbort,
    Fiq,
    SError,
    Unknown(u32),
}

impl FatalTrap {
    /// Decode the exception class field (`ESR_EL1[31:26]`) of a synchronous
    /// AArch64 exception.
    pub const fn from_exception_class(ec: u32) -> Self {
        match ec {
            0x00 => Self::UndefinedInstruction,
            0x15 => Self::SoftwareInterrupt,
            0x20 | 0x21 => Self::PrefetchAbort,
            0x24 | 0x25 => Self::DataAbort,
            ec => Self::Unknown(ec),
        }
    }
}

impl fmt::Display for FatalTrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::UndefinedInstruction => f.write_str("undefined instruction"),
            Self::SoftwareInterrupt => f.write_str("software interrupt"),
            Self::PrefetchAbort => f.write_str("prefetch abort"),
            Self::DataAbort => f.write_str("data abort"),
            Self::Fiq => f.write_str("fast interrupt"),
            Self::SError => f.write_str("system error"),
            Self::Unknown(ec) => write!(f, "unknown exception class {:#04x}", ec),
        }
    }
}
