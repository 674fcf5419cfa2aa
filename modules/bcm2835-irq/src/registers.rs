//! Interrupt controller register block.

use tock_registers::{
    interfaces::{Readable, Writeable},
    register_structs,
    registers::{ReadOnly, ReadWrite},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterBank {
    /// ARM-side sources (timer, mailbox, doorbells, ...).
    Basic,
    /// GPU sources 0..32.
    Gpu1,
    /// GPU sources 32..64.
    Gpu2,
}

impl RegisterBank {
    pub const ALL: [RegisterBank; 3] = [Self::Basic, Self::Gpu1, Self::Gpu2];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadField {
    Pending,
    Enable,
    Disable,
}

/// Pending registers are deliberately absent: a pending flag can only be
/// cleared at the peripheral that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteField {
    /// Written bits are set in the enable mask.
    Enable,
    /// Written bits are cleared from the enable mask.
    Disable,
}

/// Word-sized access to the controller. Every call is exactly one access.
pub trait IrqRegisters {
    fn read(&self, bank: RegisterBank, field: ReadField) -> u32;
    fn write(&self, bank: RegisterBank, field: WriteField, value: u32);
    fn write_fiq_control(&self, value: u32);
}

register_structs! {
    #[allow(non_snake_case)]
    pub RegisterBlock {
        (0x00 => IRQ_BASIC_PENDING: ReadOnly<u32>),
        (0x04 => IRQ_PENDING_1: ReadOnly<u32>),
        (0x08 => IRQ_PENDING_2: ReadOnly<u32>),
        (0x0C => FIQ_CONTROL: ReadWrite<u32>),
        (0x10 => ENABLE_IRQS_1: ReadWrite<u32>),
        (0x14 => ENABLE_IRQS_2: ReadWrite<u32>),
        (0x18 => ENABLE_BASIC_IRQS: ReadWrite<u32>),
        (0x1C => DISABLE_IRQS_1: ReadWrite<u32>),
        (0x20 => DISABLE_IRQS_2: ReadWrite<u32>),
        (0x24 => DISABLE_BASIC_IRQS: ReadWrite<u32>),
        (0x28 => @END),
    }
}

/// The memory-mapped controller.
pub struct Bcm2835Registers {
    base: usize,
}

impl Bcm2835Registers {
    /// # Safety
    ///
    /// `base` must point to the controller's register block (or memory laid
    /// out like it) for as long as the value is used.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    fn block(&self) -> &RegisterBlock {
        unsafe { &*(self.base as *const RegisterBlock) }
    }
}

impl IrqRegisters for Bcm2835Registers {
    fn read(&self, bank: RegisterBank, field: ReadField) -> u32 {
        let regs = self.block();
        match (bank, field) {
            (RegisterBank::Basic, ReadField::Pending) => regs.IRQ_BASIC_PENDING.get(),
            (RegisterBank::Gpu1, ReadField::Pending) => regs.IRQ_PENDING_1.get(),
            (RegisterBank::Gpu2, ReadField::Pending) => regs.IRQ_PENDING_2.get(),
            (RegisterBank::Basic, ReadField::Enable) => regs.ENABLE_BASIC_IRQS.get(),
            (RegisterBank::Gpu1, ReadField::Enable) => regs.ENABLE_IRQS_1.get(),
            (RegisterBank::Gpu2, ReadField::Enable) => regs.ENABLE_IRQS_2.get(),
            (RegisterBank::Basic, ReadField::Disable) => regs.DISABLE_BASIC_IRQS.get(),
            (RegisterBank::Gpu1, ReadField::Disable) => regs.DISABLE_IRQS_1.get(),
            (RegisterBank::Gpu2, ReadField::Disable) => regs.DISABLE_IRQS_2.get(),
        }
    }

    fn write(&self, bank: RegisterBank, field: WriteField, value: u32) {
        let regs = self.block();
        let reg = match (bank, field) {
            (RegisterBank::Basic, WriteField::Enable) => &regs.ENABLE_BASIC_IRQS,
            (RegisterBank::Gpu1, WriteField::Enable) => &regs.ENABLE_IRQS_1,
            (RegisterBank::Gpu2, WriteField::Enable) => &regs.ENABLE_IRQS_2,
            (RegisterBank::Basic, WriteField::Disable) => &regs.DISABLE_BASIC_IRQS,
            (RegisterBank::Gpu1, WriteField::Disable) => &regs.DISABLE_IRQS_1,
            (RegisterBank::Gpu2, WriteField::Disable) => &regs.DISABLE_IRQS_2,
        };
        reg.set(value);
    }

    fn write_fiq_control(&self, value: u32) {
        self.block().FIQ_CONTROL.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    const WORDS: usize = 0x28 / 4;

    struct HostBlock {
        mem: Box<[u32; WORDS]>,
    }

    impl HostBlock {
        fn new() -> Self {
            Self { mem: Box::new([0; WORDS]) }
        }

        fn registers(&mut self) -> Bcm2835Registers {
            unsafe { Bcm2835Registers::new(self.mem.as_mut_ptr() as usize) }
        }

        fn word(&mut self, offset: usize) -> u32 {
            unsafe { ptr::read_volatile(self.mem.as_mut_ptr().add(offset / 4)) }
        }

        fn set_word(&mut self, offset: usize, value: u32) {
            unsafe { ptr::write_volatile(self.mem.as_mut_ptr().add(offset / 4), value) }
        }
    }

    #[test]
    fn block_size_matches_hardware() {
        assert_eq!(core::mem::size_of::<RegisterBlock>(), 0x28);
    }

    #[test]
    fn pending_reads_hit_their_offsets() {
        let mut host = HostBlock::new();
        host.set_word(0x00, 0xA);
        host.set_word(0x04, 0xB);
        host.set_word(0x08, 0xC);
        let regs = host.registers();
        assert_eq!(regs.read(RegisterBank::Basic, ReadField::Pending), 0xA);
        assert_eq!(regs.read(RegisterBank::Gpu1, ReadField::Pending), 0xB);
        assert_eq!(regs.read(RegisterBank::Gpu2, ReadField::Pending), 0xC);
    }

    #[test]
    fn enable_writes_hit_their_offsets() {
        let mut host = HostBlock::new();
        let regs = host.registers();
        regs.write(RegisterBank::Gpu1, WriteField::Enable, 1 << 1);
        regs.write(RegisterBank::Gpu2, WriteField::Enable, 1 << 25);
        regs.write(RegisterBank::Basic, WriteField::Enable, 1 << 0);
        assert_eq!(host.word(0x10), 1 << 1);
        assert_eq!(host.word(0x14), 1 << 25);
        assert_eq!(host.word(0x18), 1 << 0);
    }

    #[test]
    fn disable_writes_hit_their_offsets() {
        let mut host = HostBlock::new();
        let regs = host.registers();
        regs.write(RegisterBank::Gpu1, WriteField::Disable, 0x11);
        regs.write(RegisterBank::Gpu2, WriteField::Disable, 0x22);
        regs.write(RegisterBank::Basic, WriteField::Disable, 0x33);
        regs.write_fiq_control(0x80);
        assert_eq!(host.word(0x1C), 0x11);
        assert_eq!(host.word(0x20), 0x22);
        assert_eq!(host.word(0x24), 0x33);
        assert_eq!(host.word(0x0C), 0x80);
        // Pending words are never written.
        assert_eq!(host.word(0x00), 0);
        assert_eq!(host.word(0x04), 0);
        assert_eq!(host.word(0x08), 0);
    }
}
