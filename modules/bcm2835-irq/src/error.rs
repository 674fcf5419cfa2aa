use crate::irq::NUM_IRQS;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqError {
    /// The number is outside `0..NUM_IRQS`.
    InvalidIrq(usize),
}

impl fmt::Display for IrqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIrq(irq) => write!(f, "IRQ {} out of range (0..{})", irq, NUM_IRQS),
        }
    }
}
