mod exception;
mod start;

use core::arch::asm;

pub use exception::install_vectors;

#[inline(always)]
pub fn wait_for_interrupt() {
    unsafe { asm!("wfi", options(nostack, preserves_flags)) };
}
