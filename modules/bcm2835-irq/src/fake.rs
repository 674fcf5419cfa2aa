//! Software model of the controller for host tests.

use crate::irq::IrqNumber;
use crate::registers::{IrqRegisters, ReadField, RegisterBank, WriteField};
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

pub struct FakeRegisters {
    pending: [AtomicU32; 3],
    enabled: [AtomicU32; 3],
    fiq_control: AtomicU32,
    pending_reads: AtomicUsize,
}

fn slot(bank: RegisterBank) -> usize {
    match bank {
        RegisterBank::Basic => 0,
        RegisterBank::Gpu1 => 1,
        RegisterBank::Gpu2 => 2,
    }
}

impl FakeRegisters {
    pub const fn new() -> Self {
        Self {
            pending: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
            enabled: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
            fiq_control: AtomicU32::new(0),
            pending_reads: AtomicUsize::new(0),
        }
    }

    /// Raise or drop a source's pending line, as its peripheral would.
    pub fn set_pending(&self, irq: IrqNumber, pending: bool) {
        let location = irq.classify();
        let word = &self.pending[slot(location.bank)];
        if pending {
            word.fetch_or(location.mask(), Ordering::SeqCst);
        } else {
            word.fetch_and(!location.mask(), Ordering::SeqCst);
        }
    }

    pub fn enabled_mask(&self, bank: RegisterBank) -> u32 {
        self.enabled[slot(bank)].load(Ordering::SeqCst)
    }

    pub fn set_enabled_mask(&self, bank: RegisterBank, mask: u32) {
        self.enabled[slot(bank)].store(mask, Ordering::SeqCst);
    }

    pub fn fiq_control(&self) -> u32 {
        self.fiq_control.load(Ordering::SeqCst)
    }

    pub fn set_fiq_control(&self, value: u32) {
        self.fiq_control.store(value, Ordering::SeqCst);
    }

    pub fn pending_reads(&self) -> usize {
        self.pending_reads.load(Ordering::SeqCst)
    }
}

impl IrqRegisters for FakeRegisters {
    fn read(&self, bank: RegisterBank, field: ReadField) -> u32 {
        match field {
            ReadField::Pending => {
                self.pending_reads.fetch_add(1, Ordering::SeqCst);
                self.pending[slot(bank)].load(Ordering::SeqCst)
            }
            ReadField::Enable | ReadField::Disable => self.enabled_mask(bank),
        }
    }

    fn write(&self, bank: RegisterBank, field: WriteField, value: u32) {
        let word = &self.enabled[slot(bank)];
        match field {
            WriteField::Enable => word.fetch_or(value, Ordering::SeqCst),
            WriteField::Disable => word.fetch_and(!value, Ordering::SeqCst),
        };
    }

    fn write_fiq_control(&self, value: u32) {
        self.set_fiq_control(value);
    }
}
