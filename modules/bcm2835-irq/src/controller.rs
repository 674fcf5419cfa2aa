use crate::handler::{HandlerEntry, IrqClearer, IrqHandler};
use crate::irq::{IrqNumber, NUM_IRQS};
use crate::registers::{IrqRegisters, ReadField, RegisterBank, WriteField};
use core::cell::UnsafeCell;

/// Handler registry and dispatcher for one interrupt controller.
///
/// Slots are written with IRQs masked and read from the IRQ trap, on a
/// single core. No lock is taken on either side.
pub struct Controller<R: IrqRegisters> {
    registers: R,
    handlers: UnsafeCell<[Option<HandlerEntry>; NUM_IRQS]>,
}

unsafe impl<R: IrqRegisters + Sync> Sync for Controller<R> {}

impl<R: IrqRegisters> Controller<R> {
    pub const fn new(registers: R) -> Self {
        Self {
            registers,
            handlers: UnsafeCell::new([None; NUM_IRQS]),
        }
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Boot-time setup: forget every handler, mask every source, install the
    /// exception vectors and finally unmask IRQs at the CPU.
    pub fn init(&self, install_vectors: impl FnOnce()) {
        interrupt::disable();
        unsafe { *self.handlers.get() = [None; NUM_IRQS] };
        for bank in RegisterBank::ALL {
            self.registers.write(bank, WriteField::Disable, u32::MAX);
        }
        self.registers.write_fiq_control(0);
        install_vectors();
        info!("interrupt controller ready, {} sources masked", NUM_IRQS);
        interrupt::enable();
    }

    /// Install `handler` and `clearer` for `irq` and unmask it. A later
    /// registration of the same number replaces this one.
    pub fn register(
        &self,
        irq: IrqNumber,
        handler: &'static dyn IrqHandler,
        clearer: &'static dyn IrqClearer,
    ) {
        {
            let _guard = interrupt::uninterruptible();
            let slot = unsafe { &mut (*self.handlers.get())[irq.index()] };
            *slot = Some(HandlerEntry { handler, clearer });
        }
        debug!("{}: handler registered", irq);
        self.enable_irq(irq);
    }

    pub fn handler(&self, irq: IrqNumber) -> Option<HandlerEntry> {
        unsafe { (*self.handlers.get())[irq.index()] }
    }

    pub fn enable_irq(&self, irq: IrqNumber) {
        let location = irq.classify();
        self.registers
            .write(location.bank, WriteField::Enable, location.mask());
        debug!("{}: enabled ({:?} bit {})", irq, location.bank, location.bit);
    }

    pub fn disable_irq(&self, irq: IrqNumber) {
        let location = irq.classify();
        self.registers
            .write(location.bank, WriteField::Disable, location.mask());
        debug!("{}: disabled ({:?} bit {})", irq, location.bank, location.bit);
    }

    pub fn is_irq_enabled(&self, irq: IrqNumber) -> bool {
        let location = irq.classify();
        self.registers.read(location.bank, ReadField::Enable) & location.mask() != 0
    }

    pub fn is_pending(&self, irq: IrqNumber) -> bool {
        let location = irq.classify();
        self.registers.read(location.bank, ReadField::Pending) & location.mask() != 0
    }

    /// Service the lowest-numbered source that is both pending and
    /// registered, and return it. Other pending sources are left for the
    /// next trap.
    ///
    /// Called from the IRQ trap with IRQs masked. The clearer runs masked;
    /// the handler runs unmasked and may be preempted by a nested trap.
    /// Returns `None` for a spurious trap.
    pub fn dispatch(&self) -> Option<IrqNumber> {
        let (irq, entry) = IrqNumber::all()
            .filter(|&irq| self.is_pending(irq))
            .find_map(|irq| self.handler(irq).map(|entry| (irq, entry)))?;
        entry.clearer.clear();
        interrupt::enable();
        entry.handler.handle();
        interrupt::disable();
        Some(irq)
    }
}
