//! Reset sequencing and trap-vector installation
//!
//! The entry stub executes with no assumptions about memory state: no
//! valid stack, statics not yet initialized. It establishes the global
//! pointer and stack from linker-provided symbols and falls through to
//! Rust code, which must not read any static until the zero/copy steps
//! have run. Each step is a strict precondition for the next; none of
//! them can fail in any recoverable sense.
//!
//! Linker contract (supplied by the firmware's `link.x`):
//! `__global_pointer$`, `__stack_top`, `__sbss`/`__ebss`,
//! `__sidata`/`__sdata`/`__edata`, `__vector_base`.

use archon_core::boot;

core::arch::global_asm!(
    r#"
    .section .init, "ax"
    .align 2
    .global _start
_start:
    .option push
    .option norelax
    la gp, __global_pointer$
    .option pop
    la sp, __stack_top
    j {start_rust}
    "#,
    start_rust = sym start_rust,
);

extern "C" {
    static mut __sbss: u32;
    static mut __ebss: u32;
    static __sidata: u32;
    static mut __sdata: u32;
    static mut __edata: u32;

    // Application entry point. Entered through `mret`, never called.
    fn main() -> !;
}

/// Trap-vector CSR mode bits: vectored dispatch through absolute
/// handler addresses.
const MTVEC_MODE: usize = 0b11;

/// Machine previous-interrupt-enable, staged so the final `mret` lands
/// in `main` with interrupts on.
const MSTATUS_MPIE: usize = 0x80;

#[no_mangle]
unsafe extern "C" fn start_rust() -> ! {
    // Stack and global pointer were established by the entry stub.
    // The memory image comes next: both regions must be settled before
    // anything reads global state, including the vector install and
    // system init below.
    boot::zero_region(&raw mut __sbss, &raw mut __ebss);
    boot::copy_region(&raw const __sidata, &raw mut __sdata, &raw mut __edata);

    // Point the trap-vector CSR at the application's finalized table.
    extern "C" {
        static __vector_base: u32;
    }
    let vectors = (&raw const __vector_base) as usize | MTVEC_MODE;
    core::arch::asm!("csrw mtvec, {0}", in(reg) vectors);

    // Clock tree, optional tick, optional port clocks.
    crate::sys_init();

    // Privileged hand-off: mret loads `main` into the program counter
    // with machine-mode state restored, so this is not a call and can
    // never return here.
    core::arch::asm!(
        "csrw mstatus, {mpie}",
        "csrw mepc, {entry}",
        "mret",
        mpie = in(reg) MSTATUS_MPIE,
        entry = in(reg) main as usize,
        options(noreturn),
    );
}
