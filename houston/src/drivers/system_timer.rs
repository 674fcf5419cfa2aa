//! BCM2835 system timer, compare channel 1.

use bcm2835_irq::{irq_map, INTERRUPT_CONTROLLER, PERIPHERAL_BASE};
use core::sync::atomic::{AtomicUsize, Ordering};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite},
};

pub const TIMER_INTERVAL_US: u32 = 10_000;

const SYSTEM_TIMER_BASE: usize = PERIPHERAL_BASE + 0x3000;

register_bitfields! {
    u32,
    CS [
        M0 OFFSET(0) NUMBITS(1) [],
        M1 OFFSET(1) NUMBITS(1) [],
        M2 OFFSET(2) NUMBITS(1) [],
        M3 OFFSET(3) NUMBITS(1) [],
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    SystemTimerRegisters {
        (0x00 => CS: ReadWrite<u32, CS::Register>),
        (0x04 => CLO: ReadOnly<u32>),
        (0x08 => CHI: ReadOnly<u32>),
        (0x0C => C0: ReadWrite<u32>),
        (0x10 => C1: ReadWrite<u32>),
        (0x14 => C2: ReadWrite<u32>),
        (0x18 => C3: ReadWrite<u32>),
        (0x1C => @END),
    }
}

fn timer() -> &'static SystemTimerRegisters {
    unsafe { &*(SYSTEM_TIMER_BASE as *const SystemTimerRegisters) }
}

// Only touched from the timer handler, which never nests with itself.
static TICKS: AtomicUsize = AtomicUsize::new(0);

fn arm_next() {
    let timer = timer();
    timer.C1.set(timer.CLO.get().wrapping_add(TIMER_INTERVAL_US));
}

/// Write-one-to-clear the channel 1 match flag.
fn clear() {
    timer().CS.write(CS::M1::SET);
}

fn tick() {
    arm_next();
    let ticks = TICKS.load(Ordering::Relaxed) + 1;
    TICKS.store(ticks, Ordering::Relaxed);
    if ticks % 100 == 0 {
        trace!("timer: {} ticks", ticks);
    }
}

pub fn init() {
    arm_next();
    INTERRUPT_CONTROLLER.register(irq_map::SYSTEM_TIMER_1, &tick, &clear);
    info!("timer: {}us period on {}", TIMER_INTERVAL_US, irq_map::SYSTEM_TIMER_1);
}
