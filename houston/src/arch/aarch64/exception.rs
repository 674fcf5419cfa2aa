use bcm2835_irq::INTERRUPT_CONTROLLER;
use core::arch::global_asm;
use core::ptr;
use cortex_a::{asm::barrier, registers::*};
use interrupt::FatalTrap;
use tock_registers::interfaces::{Readable, Writeable};

const SYNCHRONOUS: u64 = 0;
const FIQ: u64 = 1;
const SERROR: u64 = 2;

#[no_mangle]
extern "C" fn handle_irq() {
    INTERRUPT_CONTROLLER.dispatch();
}

#[no_mangle]
extern "C" fn handle_fatal(kind: u64) -> ! {
    let trap = match kind {
        SYNCHRONOUS => FatalTrap::from_exception_class(ESR_EL1.read(ESR_EL1::EC) as u32),
        FIQ => FatalTrap::Fiq,
        SERROR => FatalTrap::SError,
        _ => FatalTrap::Unknown(kind as u32),
    };
    error!(
        "{} ELR={:#x} FAR={:#x} ESR={:#x}",
        trap,
        ELR_EL1.get(),
        FAR_EL1.get(),
        ESR_EL1.get()
    );
    interrupt::halt()
}

extern "C" {
    static exception_vectors: u8;
}

/// Point `VBAR_EL1` at the vector table below.
pub fn install_vectors() {
    let base = unsafe { ptr::addr_of!(exception_vectors) } as u64;
    VBAR_EL1.set(base);
    unsafe { barrier::isb(barrier::SY) };
}

// IRQ entries save every register the AAPCS lets `handle_irq` clobber, plus
// ELR_EL1/SPSR_EL1: a handler runs with IRQs unmasked, so a nested IRQ
// overwrites both.
global_asm! {"
.macro save_frame
    sub     sp, sp, #192
    stp     x0,  x1,  [sp, #0]
    stp     x2,  x3,  [sp, #16]
    stp     x4,  x5,  [sp, #32]
    stp     x6,  x7,  [sp, #48]
    stp     x8,  x9,  [sp, #64]
    stp     x10, x11, [sp, #80]
    stp     x12, x13, [sp, #96]
    stp     x14, x15, [sp, #112]
    stp     x16, x17, [sp, #128]
    stp     x18, x29, [sp, #144]
    mrs     x0, elr_el1
    mrs     x1, spsr_el1
    stp     x30, x0,  [sp, #160]
    str     x1,       [sp, #176]
.endm

.macro restore_frame
    ldr     x1,       [sp, #176]
    ldp     x30, x0,  [sp, #160]
    msr     spsr_el1, x1
    msr     elr_el1, x0
    ldp     x18, x29, [sp, #144]
    ldp     x16, x17, [sp, #128]
    ldp     x14, x15, [sp, #112]
    ldp     x12, x13, [sp, #96]
    ldp     x10, x11, [sp, #80]
    ldp     x8,  x9,  [sp, #64]
    ldp     x6,  x7,  [sp, #48]
    ldp     x4,  x5,  [sp, #32]
    ldp     x2,  x3,  [sp, #16]
    ldp     x0,  x1,  [sp, #0]
    add     sp, sp, #192
.endm

.macro fatal kind
    .align 7
    mov     x0, #\\kind
    b       fatal_entry
.endm

.macro irq
    .align 7
    b       irq_entry
.endm

.macro vector_group
    fatal 0
    irq
    fatal 1
    fatal 2
.endm

.section .text
irq_entry:
    save_frame
    bl      handle_irq
    restore_frame
    eret

fatal_entry:
    bl      handle_fatal
2:  wfe
    b       2b

.balign 2048
.global exception_vectors
exception_vectors:
    // Current EL, SP_EL0
    vector_group
    // Current EL, SP_ELx
    vector_group
    // Lower EL, AArch64
    vector_group
    // Lower EL, AArch32
    vector_group
"}
