//! CPU-level interrupt gate.
//!
//! These are the only functions in the kernel that touch the processor's IRQ
//! mask. Everything else, including the dispatcher's nesting protocol, goes
//! through [`enable`], [`disable`] and [`uninterruptible`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod trap;

pub use trap::FatalTrap;

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod imp {
    use core::arch::asm;

    const CPSR_I: u32 = 1 << 7;

    #[inline(always)]
    pub fn irq_masked() -> bool {
        let cpsr: u32;
        unsafe { asm!("mrs {}, cpsr", out(reg) cpsr, options(nostack, preserves_flags)) };
        cpsr & CPSR_I != 0
    }

    #[inline(always)]
    pub unsafe fn unmask_irq() {
        asm!("cpsie i", options(nostack, preserves_flags));
    }

    #[inline(always)]
    pub unsafe fn mask_irq() {
        asm!("cpsid i", options(nostack, preserves_flags));
    }

    #[inline(always)]
    pub fn wait_for_event() {
        unsafe { asm!("wfe", options(nostack, preserves_flags)) };
    }
}

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod imp {
    use core::arch::asm;
    use cortex_a::registers::DAIF;
    use tock_registers::interfaces::Readable;

    #[inline(always)]
    pub fn irq_masked() -> bool {
        DAIF.is_set(DAIF::I)
    }

    #[inline(always)]
    pub unsafe fn unmask_irq() {
        asm!("msr daifclr, #2", options(nostack, preserves_flags));
    }

    #[inline(always)]
    pub unsafe fn mask_irq() {
        asm!("msr daifset, #2", options(nostack, preserves_flags));
    }

    #[inline(always)]
    pub fn wait_for_event() {
        unsafe { asm!("wfe", options(nostack, preserves_flags)) };
    }
}

/// Software gate for hosted builds. Starts masked, like a CPU out of reset.
#[cfg(not(target_os = "none"))]
mod imp {
    #[cfg(any(test, feature = "std"))]
    mod state {
        use std::cell::Cell;

        std::thread_local! {
            static MASKED: Cell<bool> = const { Cell::new(true) };
            static TRANSITIONS: Cell<usize> = const { Cell::new(0) };
        }

        pub fn masked() -> bool {
            MASKED.with(|m| m.get())
        }

        pub fn set_masked(masked: bool) {
            MASKED.with(|m| m.set(masked));
            TRANSITIONS.with(|t| t.set(t.get() + 1));
        }

        #[cfg(test)]
        pub fn transitions() -> usize {
            TRANSITIONS.with(|t| t.get())
        }
    }

    #[cfg(not(any(test, feature = "std")))]
    mod state {
        use core::sync::atomic::{AtomicBool, Ordering};

        static MASKED: AtomicBool = AtomicBool::new(true);

        pub fn masked() -> bool {
            MASKED.load(Ordering::SeqCst)
        }

        pub fn set_masked(masked: bool) {
            MASKED.store(masked, Ordering::SeqCst);
        }
    }

    #[cfg(test)]
    pub use state::transitions;

    pub fn irq_masked() -> bool {
        state::masked()
    }

    pub unsafe fn unmask_irq() {
        state::set_masked(false);
    }

    pub unsafe fn mask_irq() {
        state::set_masked(true);
    }

    pub fn wait_for_event() {
        core::hint::spin_loop();
    }
}

#[inline]
pub fn is_enabled() -> bool {
    !imp::irq_masked()
}

/// Unmask IRQs. Does nothing if they are already unmasked.
#[inline]
pub fn enable() {
    if !is_enabled() {
        unsafe { imp::unmask_irq() };
    }
}

/// Mask IRQs. Does nothing if they are already masked.
#[inline]
pub fn disable() {
    if is_enabled() {
        unsafe { imp::mask_irq() };
    }
}

/// Mask IRQs until the returned guard is dropped, then restore the previous
/// state.
#[inline]
pub fn uninterruptible() -> impl Drop {
    struct Guard {
        enabled: bool,
    }
    impl Drop for Guard {
        fn drop(&mut self) {
            if self.enabled {
                enable();
            }
        }
    }
    let enabled = is_enabled();
    if enabled {
        disable();
    }
    Guard { enabled }
}

/// Terminal state: mask IRQs and wait forever.
pub fn halt() -> ! {
    disable();
    loop {
        imp::wait_for_event();
    }
}
