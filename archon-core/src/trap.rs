//! Vector-table model
//!
//! The hardware consults a fixed-offset table of handler addresses on
//! every interrupt or exception. Layout and slot count are fixed by the
//! chip and must never be reordered or resized, and handler binding is a
//! build-time decision: there is no runtime registration.
//!
//! [`VectorTable`] is the const builder: every slot starts out aliasing
//! a single fail-stop default, and `with` binds an override at
//! construction. [`VectorTable::finalize`] produces the raw array of
//! word-sized entries the hardware actually dereferences; the chip crate
//! fixes the handler ABI and slot layout, and the firmware places the
//! finalized table in its dedicated linker section.

/// A vector table under construction.
///
/// `H` is the handler reference type (a plain `fn()` on the host, the
/// target's interrupt ABI on hardware); `N` is the hardware-fixed slot
/// count.
#[derive(Debug, Clone, Copy)]
pub struct VectorTable<H: Copy, const N: usize> {
    slots: [H; N],
    bound: [bool; N],
}

impl<H: Copy, const N: usize> VectorTable<H, N> {
    /// A table with every slot aliasing `default`.
    ///
    /// The default's contract is fail-stop: halt forward progress in an
    /// idle loop, leaving a started watchdog able to force a reset.
    pub const fn new(default: H) -> Self {
        VectorTable {
            slots: [default; N],
            bound: [false; N],
        }
    }

    /// Bind an override for one slot. A slot index outside the table is
    /// a build error (const evaluation fails).
    pub const fn with(mut self, slot: usize, handler: H) -> Self {
        self.slots[slot] = handler;
        self.bound[slot] = true;
        self
    }

    /// Whether a slot carries an application override
    pub const fn is_bound(&self, slot: usize) -> bool {
        self.bound[slot]
    }

    /// Handler a dispatch of `slot` would invoke
    pub const fn resolve(&self, slot: usize) -> H {
        self.slots[slot]
    }

    /// Number of slots
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Freeze into the hardware image: exactly `N` word-sized entries,
    /// unbound slots carrying the fail-stop default.
    pub const fn finalize(self) -> RawVectorTable<H, N> {
        RawVectorTable { slots: self.slots }
    }
}

/// Hardware image of a finalized vector table.
///
/// Guaranteed to be laid out as a bare `[H; N]` so the trap-vector base
/// register can point straight at it.
#[repr(C)]
pub struct RawVectorTable<H: Copy, const N: usize> {
    slots: [H; N],
}

impl<H: Copy, const N: usize> RawVectorTable<H, N> {
    /// Entry the hardware would fetch for `slot`
    pub const fn entry(&self, slot: usize) -> H {
        self.slots[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unbound_slot_invokes_default_exactly_once() {
        static DEFAULT_HITS: AtomicUsize = AtomicUsize::new(0);
        static OVERRIDE_HITS: AtomicUsize = AtomicUsize::new(0);

        fn fail_stop_stand_in() {
            DEFAULT_HITS.fetch_add(1, Ordering::Relaxed);
        }
        fn override_handler() {
            OVERRIDE_HITS.fetch_add(1, Ordering::Relaxed);
        }

        let table: VectorTable<fn(), 8> =
            VectorTable::new(fail_stop_stand_in as fn()).with(3, override_handler);

        // dispatch of an unbound slot: the default runs, nothing else
        (table.resolve(5))();
        assert_eq!(DEFAULT_HITS.load(Ordering::Relaxed), 1);
        assert_eq!(OVERRIDE_HITS.load(Ordering::Relaxed), 0);

        // dispatch of the bound slot: only the override runs
        (table.resolve(3))();
        assert_eq!(DEFAULT_HITS.load(Ordering::Relaxed), 1);
        assert_eq!(OVERRIDE_HITS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn binding_is_tracked_per_slot() {
        fn nop() {}
        let table: VectorTable<fn(), 4> = VectorTable::new(nop as fn()).with(2, nop);
        assert!(table.is_bound(2));
        assert!(!table.is_bound(0));
        assert!(!table.is_bound(3));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn finalized_table_is_exactly_n_words() {
        assert_eq!(
            core::mem::size_of::<RawVectorTable<fn(), 39>>(),
            39 * core::mem::size_of::<fn()>()
        );
    }

    #[test]
    fn finalized_entries_match_builder_resolution() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        fn spin() {}
        fn tick() {
            HITS.fetch_add(1, Ordering::Relaxed);
        }

        let raw = VectorTable::<fn(), 6>::new(spin as fn())
            .with(4, tick)
            .finalize();
        (raw.entry(4))();
        assert_eq!(HITS.load(Ordering::Relaxed), 1);
    }
}
