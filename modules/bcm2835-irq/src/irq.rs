//! IRQ numbering.
//!
//! The controller exposes 72 sources over three register banks:
//!
//! | IRQ      | Bank          | Bit        |
//! |----------|---------------|------------|
//! | 0..32    | GPU bank 1    | `irq`      |
//! | 32..64   | GPU bank 2    | `irq - 32` |
//! | 64..72   | basic (ARM)   | `irq - 64` |
//!
//! This is the only place that turns a number into a bank and bit.

use crate::error::IrqError;
use crate::registers::RegisterBank;
use core::fmt;

pub const GPU_BANK_SIZE: usize = 32;
pub const BASIC_BANK_SIZE: usize = 8;

pub const GPU1_BASE: usize = 0;
pub const GPU2_BASE: usize = GPU1_BASE + GPU_BANK_SIZE;
pub const BASIC_BASE: usize = GPU2_BASE + GPU_BANK_SIZE;

pub const NUM_IRQS: usize = BASIC_BASE + BASIC_BANK_SIZE;

/// A valid interrupt source number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqNumber(usize);

/// Location of a source inside the register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankBit {
    pub bank: RegisterBank,
    pub bit: u32,
}

impl BankBit {
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.bit
    }
}

impl IrqNumber {
    pub const fn new(irq: usize) -> Result<Self, IrqError> {
        if irq < NUM_IRQS {
            Ok(Self(irq))
        } else {
            Err(IrqError::InvalidIrq(irq))
        }
    }

    /// Only for numbers known to be in range at compile time.
    const fn known(irq: usize) -> Self {
        assert!(irq < NUM_IRQS);
        Self(irq)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    pub const fn classify(self) -> BankBit {
        let irq = self.0;
        if irq >= BASIC_BASE {
            BankBit {
                bank: RegisterBank::Basic,
                bit: (irq - BASIC_BASE) as u32,
            }
        } else if irq >= GPU2_BASE {
            BankBit {
                bank: RegisterBank::Gpu2,
                bit: (irq - GPU2_BASE) as u32,
            }
        } else {
            BankBit {
                bank: RegisterBank::Gpu1,
                bit: (irq - GPU1_BASE) as u32,
            }
        }
    }

    /// All sources in ascending order, which is also dispatch priority.
    pub fn all() -> impl Iterator<Item = IrqNumber> {
        (0..NUM_IRQS).map(Self)
    }
}

impl TryFrom<usize> for IrqNumber {
    type Error = IrqError;

    fn try_from(irq: usize) -> Result<Self, Self::Error> {
        Self::new(irq)
    }
}

impl From<IrqNumber> for usize {
    fn from(irq: IrqNumber) -> usize {
        irq.0
    }
}

impl fmt::Display for IrqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IRQ{}", self.0)
    }
}

/// Named sources from the BCM2835 ARM peripherals manual.
pub mod irq_map {
    use super::IrqNumber;

    pub const SYSTEM_TIMER_1: IrqNumber = IrqNumber::known(1);
    pub const SYSTEM_TIMER_3: IrqNumber = IrqNumber::known(3);
    pub const USB: IrqNumber = IrqNumber::known(9);
    pub const AUX: IrqNumber = IrqNumber::known(29);
    pub const I2C_SPI_SLAVE: IrqNumber = IrqNumber::known(43);
    pub const PWA0: IrqNumber = IrqNumber::known(45);
    pub const PWA1: IrqNumber = IrqNumber::known(46);
    pub const SMI: IrqNumber = IrqNumber::known(48);
    pub const GPIO0: IrqNumber = IrqNumber::known(49);
    pub const GPIO1: IrqNumber = IrqNumber::known(50);
    pub const GPIO2: IrqNumber = IrqNumber::known(51);
    pub const GPIO3: IrqNumber = IrqNumber::known(52);
    pub const I2C: IrqNumber = IrqNumber::known(53);
    pub const SPI: IrqNumber = IrqNumber::known(54);
    pub const PCM: IrqNumber = IrqNumber::known(55);
    pub const UART: IrqNumber = IrqNumber::known(57);
    // Basic bank
    pub const ARM_TIMER: IrqNumber = IrqNumber::known(64);
    pub const ARM_MAILBOX: IrqNumber = IrqNumber::known(65);
    pub const ARM_DOORBELL_0: IrqNumber = IrqNumber::known(66);
    pub const ARM_DOORBELL_1: IrqNumber = IrqNumber::known(67);
    pub const GPU0_HALTED: IrqNumber = IrqNumber::known(68);
    pub const GPU1_HALTED: IrqNumber = IrqNumber::known(69);
    pub const ILLEGAL_ACCESS_1: IrqNumber = IrqNumber::known(70);
    pub const ILLEGAL_ACCESS_0: IrqNumber = IrqNumber::known(71);
}
