/*++

Licensed under the Apache-2.0 license.

File Name:

    march.rs

Abstract:

    File contains the memory march test: three address partitions of a
    word-addressed region round-trip a per-index pattern through
    write-then-read. The partitions sample the first 10%, the middle 40%
    to 50%, and the last 10% of the region, trading full coverage for
    test time while still hitting both boundaries and the interior.

--*/

use crate::memmap;
use caravel_emu_bus::{Bus, BusError};
use caravel_emu_types::{RvData, RvSize};
use core::ops::Range;

/// Test pattern for word `index`: an alternating checkerboard with the bit
/// at `index % 32` forced to zero. The walking zero makes address-decoding
/// faults distinguishable from stuck bits.
pub fn pattern(index: u32) -> RvData {
    0x5555_5555 & !(1 << (index % 32))
}

/// Outcome of a march test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchResult {
    /// Every word in every partition matched
    Pass,

    /// First mismatching word; nothing past it was checked
    Mismatch {
        /// Word index within the region
        index: u32,
        expected: RvData,
        actual: RvData,
    },
}

/// Memory march test over a word-addressed region in the user window.
pub struct MarchTest {
    /// Word offset of the region within the user window
    base: u32,

    /// Total words in the region
    words: u32,
}

impl MarchTest {
    /// Create a march test.
    ///
    /// # Arguments
    ///
    /// * `base` - Word offset of the region within the user window
    /// * `words` - Total words in the region
    pub fn new(base: u32, words: u32) -> Self {
        Self { base, words }
    }

    /// The three tested partitions: `[0, n/10)`, `[4n/10, 5n/10)` and
    /// `[9n/10, n)`, as word indices within the region.
    pub fn partitions(&self) -> [Range<u32>; 3] {
        let n = self.words;
        [0..n / 10, n * 4 / 10..n * 5 / 10, n * 9 / 10..n]
    }

    /// Run the test: write the pattern over each partition in increasing
    /// index order, read it back and compare. The first mismatch ends the
    /// invocation; later words, partitions and regions are not touched.
    ///
    /// # Arguments
    ///
    /// * `bus` - Bus the region is reachable over
    pub fn run(&self, bus: &mut impl Bus) -> Result<MarchResult, BusError> {
        for range in self.partitions() {
            for i in range.clone() {
                bus.write(
                    RvSize::Word,
                    memmap::user_word_addr(self.base + i),
                    pattern(i),
                )?;
            }
            for i in range {
                let expected = pattern(i);
                let actual = bus.read(RvSize::Word, memmap::user_word_addr(self.base + i))?;
                if actual != expected {
                    return Ok(MarchResult::Mismatch {
                        index: i,
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(MarchResult::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravel_emu_types::RvAddr;
    use std::collections::HashMap;

    /// Sparse word-addressed memory covering the whole user window, with
    /// an optional corrupted read at one address.
    struct TestMem {
        words: HashMap<RvAddr, RvData>,
        corrupt_addr: Option<RvAddr>,
        reads: Vec<RvAddr>,
    }

    impl TestMem {
        fn new() -> Self {
            Self {
                words: HashMap::new(),
                corrupt_addr: None,
                reads: Vec::new(),
            }
        }
    }

    impl Bus for TestMem {
        fn read(&mut self, _size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
            self.reads.push(addr);
            let data = *self.words.get(&addr).unwrap_or(&0);
            if self.corrupt_addr == Some(addr) {
                Ok(data ^ 1)
            } else {
                Ok(data)
            }
        }

        fn write(&mut self, _size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
            self.words.insert(addr, val);
            Ok(())
        }
    }

    #[test]
    fn test_pattern_is_deterministic() {
        for i in [0, 1, 31, 32, 45, 1023] {
            assert_eq!(pattern(i), pattern(i));
        }
        assert_eq!(pattern(0), pattern(32));
    }

    #[test]
    fn test_pattern_values() {
        assert_eq!(pattern(0), 0x5555_5554);
        // Bit 1 is already clear in the checkerboard
        assert_eq!(pattern(1), 0x5555_5555);
        assert_eq!(pattern(2), 0x5555_5551);
        assert_eq!(pattern(31), 0x5555_5555);
    }

    #[test]
    fn test_partitions_cover_ten_percent_samples() {
        let parts = MarchTest::new(0, 100).partitions();
        assert_eq!(parts, [0..10, 40..50, 90..100]);
    }

    #[test]
    fn test_partitions_one_word_each_at_ten() {
        let parts = MarchTest::new(0, 10).partitions();
        assert_eq!(parts, [0..1, 4..5, 9..10]);
    }

    #[test]
    fn test_partitions_tiny_region() {
        // Integer division empties the leading partition below 10 words
        let parts = MarchTest::new(0, 9).partitions();
        assert_eq!(parts, [0..0, 3..4, 8..9]);
    }

    #[test]
    fn test_clean_run_passes() {
        let mut mem = TestMem::new();
        let result = MarchTest::new(0x1_0000, 1024).run(&mut mem).unwrap();
        assert_eq!(result, MarchResult::Pass);
        // 1024/10 + (512-409) + (1024-921) words checked
        assert_eq!(mem.reads.len(), 102 + 103 + 103);
    }

    #[test]
    fn test_mismatch_stops_at_failing_word() {
        let mut mem = TestMem::new();
        mem.corrupt_addr = Some(memmap::user_word_addr(45));
        let result = MarchTest::new(0, 100).run(&mut mem).unwrap();
        assert_eq!(
            result,
            MarchResult::Mismatch {
                index: 45,
                expected: pattern(45),
                actual: pattern(45) ^ 1,
            }
        );
        // Partition [40, 50) was read only up to the failing word
        assert_eq!(*mem.reads.last().unwrap(), memmap::user_word_addr(45));
        assert!(!mem.reads.contains(&memmap::user_word_addr(46)));
        // The final partition was never written
        assert!(!mem.words.contains_key(&memmap::user_word_addr(90)));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut mem = TestMem::new();
        let test = MarchTest::new(0, 100);
        assert_eq!(test.run(&mut mem).unwrap(), MarchResult::Pass);
        assert_eq!(test.run(&mut mem).unwrap(), MarchResult::Pass);

        mem.corrupt_addr = Some(memmap::user_word_addr(45));
        assert_ne!(test.run(&mut mem).unwrap(), MarchResult::Pass);
        assert_ne!(test.run(&mut mem).unwrap(), MarchResult::Pass);
    }

    #[test]
    fn test_base_offsets_the_region() {
        let mut mem = TestMem::new();
        MarchTest::new(0x1_4000, 10).run(&mut mem).unwrap();
        assert!(mem.words.contains_key(&memmap::user_word_addr(0x1_4000)));
        assert!(mem.words.contains_key(&memmap::user_word_addr(0x1_4009)));
    }
}
