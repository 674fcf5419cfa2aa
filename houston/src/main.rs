//! Houston: a small Raspberry Pi 3 kernel (AArch64, single core).
//!
//! Build with `--target aarch64-unknown-none-softfloat`. On a hosted target
//! this binary is empty so the workspace still builds and tests.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
#[macro_use]
extern crate log;

#[cfg(target_os = "none")]
mod arch;
#[cfg(target_os = "none")]
mod drivers;
#[cfg(target_os = "none")]
mod utils;

#[cfg(target_os = "none")]
fn display_banner() {
    info!("");
    info!("Houston, the kernel is up! v{}", env!("CARGO_PKG_VERSION"));
    info!("");
}

/// Entered from `_start` on core 0, at EL1, IRQs masked.
#[cfg(target_os = "none")]
#[no_mangle]
pub extern "C" fn kernel_main() -> ! {
    utils::boot_logger::init();
    display_banner();
    bcm2835_irq::interrupts_init(arch::install_vectors);
    drivers::system_timer::init();
    loop {
        arch::wait_for_interrupt();
    }
}

#[cfg(target_os = "none")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    error!("{}", info);
    interrupt::halt()
}

#[cfg(not(target_os = "none"))]
fn main() {}
