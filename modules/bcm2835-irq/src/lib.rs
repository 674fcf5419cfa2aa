//! Driver for the BCM2835 family ARM interrupt controller (Raspberry Pi 1-3).
//!
//! Peripheral drivers register a handler and a clearer per source with
//! [`register_irq_handler`]. The kernel's IRQ trap calls
//! [`Controller::dispatch`] on [`INTERRUPT_CONTROLLER`], which services the
//! lowest-numbered pending source with IRQs unmasked around the handler so
//! that other sources can nest.

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

mod controller;
mod error;
#[cfg(test)]
mod fake;
mod handler;
pub mod irq;
pub mod registers;

pub use controller::Controller;
pub use error::IrqError;
pub use handler::{HandlerEntry, IrqClearer, IrqHandler};
pub use irq::{irq_map, BankBit, IrqNumber, NUM_IRQS};
pub use registers::{Bcm2835Registers, IrqRegisters, ReadField, RegisterBank, WriteField};

#[cfg(feature = "raspi1")]
pub const PERIPHERAL_BASE: usize = 0x2000_0000;
#[cfg(not(feature = "raspi1"))]
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;

pub const IRQ_BASE: usize = PERIPHERAL_BASE + 0xB200;

pub static INTERRUPT_CONTROLLER: Controller<Bcm2835Registers> =
    Controller::new(unsafe { Bcm2835Registers::new(IRQ_BASE) });

/// Reset the controller and unmask IRQs at the CPU. `install_vectors` runs
/// with IRQs still masked and must leave the exception vectors pointing at
/// the kernel's trap entries.
pub fn interrupts_init(install_vectors: impl FnOnce()) {
    INTERRUPT_CONTROLLER.init(install_vectors);
}

pub fn register_irq_handler(
    irq: usize,
    handler: &'static dyn IrqHandler,
    clearer: &'static dyn IrqClearer,
) -> Result<IrqNumber, IrqError> {
    let irq = IrqNumber::new(irq).map_err(|e| {
        warn!("refusing handler registration: {}", e);
        e
    })?;
    INTERRUPT_CONTROLLER.register(irq, handler, clearer);
    Ok(irq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nop() {}

    #[test]
    fn register_irq_handler_refuses_out_of_range() {
        // Fails before the MMIO block is ever touched.
        assert_eq!(
            register_irq_handler(NUM_IRQS, &nop, &nop),
            Err(IrqError::InvalidIrq(NUM_IRQS))
        );
        assert_eq!(
            register_irq_handler(1000, &nop, &nop),
            Err(IrqError::InvalidIrq(1000))
        );
        let last = IrqNumber::new(NUM_IRQS - 1).unwrap();
        assert!(INTERRUPT_CONTROLLER.handler(last).is_none());
    }

    #[test]
    fn register_block_address() {
        #[cfg(not(feature = "raspi1"))]
        assert_eq!(IRQ_BASE, 0x3F00_B200);
        #[cfg(feature = "raspi1")]
        assert_eq!(IRQ_BASE, 0x2000_B200);
    }
}
