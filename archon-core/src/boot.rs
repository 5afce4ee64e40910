//! Boot memory-region operations
//!
//! The first real work after reset: zeroing the uninitialized static
//! region and copying the initialized-data image from non-volatile
//! storage into working memory, word by word. Both must complete before
//! any code reads global state - the reset sequencer runs them before
//! the vector table is installed and before system initialization.
//!
//! The region boundaries come from the link step; they are an external
//! contract, never computed at runtime.

/// Zero the word-aligned region `[start, end)`.
///
/// # Safety
///
/// - `start..end` must be a writable, word-aligned region owned by the
///   caller, with `start <= end`.
/// - No reference to any part of the region may be live.
pub unsafe fn zero_region(mut start: *mut u32, end: *mut u32) {
    while start < end {
        start.write_volatile(0);
        start = start.add(1);
    }
}

/// Copy words from `src` into the region `[dst, dst_end)`.
///
/// # Safety
///
/// - `dst..dst_end` must be a writable, word-aligned region owned by the
///   caller, with `dst <= dst_end`.
/// - `src` must be readable for the same number of words and must not
///   overlap the destination.
/// - No reference to any part of the destination may be live.
pub unsafe fn copy_region(mut src: *const u32, mut dst: *mut u32, dst_end: *mut u32) {
    while dst < dst_end {
        dst.write_volatile(src.read_volatile());
        src = src.add(1);
        dst = dst.add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroes_sixteen_byte_region() {
        let mut region: [u32; 4] = [0xDEAD_BEEF; 4];
        let range = region.as_mut_ptr_range();
        unsafe { zero_region(range.start, range.end) };
        assert_eq!(region, [0u32; 4]);
        assert!(region.iter().flat_map(|w| w.to_ne_bytes()).all(|b| b == 0));
    }

    #[test]
    fn copies_eight_byte_image_exactly() {
        let image: [u32; 2] = [0x0102_0304, 0x0506_0708];
        let mut ram: [u32; 2] = [0xFFFF_FFFF; 2];
        let range = ram.as_mut_ptr_range();
        unsafe { copy_region(image.as_ptr(), range.start, range.end) };
        assert_eq!(ram, image);
    }

    #[test]
    fn empty_regions_are_a_no_op() {
        let mut region: [u32; 2] = [7, 7];
        let base = region.as_mut_ptr();
        unsafe {
            zero_region(base, base);
            copy_region(base.cast_const(), base, base);
        }
        assert_eq!(region, [7, 7]);
    }

    #[test]
    fn boot_scenario_orders_zero_then_copy() {
        // the reset sequencer's memory picture: a 16-byte uninitialized
        // region and an 8-byte initialized region with a known image
        let mut bss: [u32; 4] = [0x5555_5555; 4];
        let image: [u32; 2] = [0xCAFE_F00D, 0x1234_5678];
        let mut data: [u32; 2] = [0; 2];

        let bss_range = bss.as_mut_ptr_range();
        let data_range = data.as_mut_ptr_range();
        unsafe {
            zero_region(bss_range.start, bss_range.end);
            copy_region(image.as_ptr(), data_range.start, data_range.end);
        }

        assert_eq!(bss, [0; 4]);
        assert_eq!(data, image);
    }
}
