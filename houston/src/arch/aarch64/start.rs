use core::arch::global_asm;

// Firmware starts every core at 0x80000, usually in EL2. Core 0 drops to
// EL1h with DAIF masked, takes the stack below the image and zeroes .bss.
global_asm! {"
.section .text.boot, \"ax\"
.global _start

_start:
    mrs     x0, mpidr_el1
    and     x0, x0, #3
    cbz     x0, 2f
1:  wfe
    b       1b

2:  ldr     x0, =0x80000
    mrs     x1, CurrentEL
    lsr     x1, x1, #2
    cmp     x1, #2
    b.ne    3f

    // EL2 -> EL1
    ldr     x1, =0x30d00800         // SCTLR_EL1: RES1 bits, MMU and caches off
    msr     sctlr_el1, x1
    mov     x1, #0x80000000         // HCR_EL2.RW: EL1 is AArch64
    msr     hcr_el2, x1
    mov     x1, #0x3c5              // SPSR_EL2: EL1h, DAIF masked
    msr     spsr_el2, x1
    adr     x1, 3f
    msr     elr_el2, x1
    msr     sp_el1, x0
    eret

3:  mov     sp, x0
    ldr     x1, =__bss_start
    ldr     x2, =__bss_end
4:  cmp     x1, x2
    b.hs    5f
    str     xzr, [x1], #8
    b       4b

5:  bl      kernel_main
    b       1b
"}
