use bcm2835_irq::PERIPHERAL_BASE;
use core::fmt::{self, Write};
use log::{LevelFilter, Log, Metadata, Record};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_structs,
    registers::{ReadOnly, ReadWrite},
};

const UART_BASE: usize = PERIPHERAL_BASE + 0x20_1000;
const FR_TXFF: u32 = 1 << 5;

register_structs! {
    #[allow(non_snake_case)]
    UartRegisters {
        (0x00 => DR: ReadWrite<u32>),
        (0x04 => _reserved),
        (0x18 => FR: ReadOnly<u32>),
        (0x1C => @END),
    }
}

#[cfg(feature = "verbose")]
const LEVEL: LevelFilter = LevelFilter::Trace;
#[cfg(not(feature = "verbose"))]
const LEVEL: LevelFilter = LevelFilter::Info;

static LOGGER: BootLogger = BootLogger;

/// Only call once, before the first log line and with IRQs masked.
pub fn init() {
    unsafe { log::set_logger_racy(&LOGGER) }.ok();
    unsafe { log::set_max_level_racy(LEVEL) };
}

struct Uart(&'static UartRegisters);

impl Uart {
    fn get() -> Self {
        Self(unsafe { &*(UART_BASE as *const UartRegisters) })
    }

    fn putc(&self, c: u8) {
        while self.0.FR.get() & FR_TXFF != 0 {}
        self.0.DR.set(c as u32);
    }
}

impl Write for Uart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            if b == b'\n' {
                self.putc(b'\r');
            }
            self.putc(b);
        }
        Ok(())
    }
}

struct BootLogger;

impl Log for BootLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LEVEL
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _guard = interrupt::uninterruptible();
        let _ = writeln!(Uart::get(), "[{:<5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}
