/*++

Licensed under the Apache-2.0 license.

File Name:

    sram.rs

Abstract:

    File contains the SRAM macro model. The macro is a word-addressed RAM
    behind the user project wishbone; byte and half-word accesses fault.
    A read fault can be injected at a single word index to model the
    corrupted-cell scenarios the verification flows must detect, and all
    word accesses are logged so tests can check which indices a firmware
    flow actually touched.

--*/

use caravel_emu_bus::{Bus, BusError, Ram};
use caravel_emu_types::{RvAddr, RvData, RvSize};

/// Injected read corruption at a single word index.
#[derive(Debug, Clone, Copy)]
struct ReadFault {
    word_index: u32,
    xor_mask: u32,
}

/// SRAM macro model
pub struct SramMacro {
    /// Backing storage
    ram: Ram,

    /// Optional injected read corruption
    fault: Option<ReadFault>,

    /// Word indices read, in order
    read_log: Vec<u32>,

    /// Word indices written, in order
    write_log: Vec<u32>,
}

impl SramMacro {
    /// Create a new SRAM macro model of `words` 32-bit words, zero-filled.
    pub fn new(words: u32) -> Self {
        Self {
            ram: Ram::new(vec![0; words as usize * 4]),
            fault: None,
            read_log: Vec::new(),
            write_log: Vec::new(),
        }
    }

    /// Number of words in the macro.
    pub fn words(&self) -> u32 {
        self.ram.mmap_size() / 4
    }

    /// Memory map size in bytes.
    pub fn mmap_size(&self) -> RvAddr {
        self.ram.mmap_size()
    }

    /// Corrupt reads of word `word_index` by XOR-ing the stored value with
    /// `xor_mask`. The stored data is untouched; only read-back is affected,
    /// like a faulty sense amp.
    pub fn inject_read_fault(&mut self, word_index: u32, xor_mask: u32) {
        self.fault = Some(ReadFault {
            word_index,
            xor_mask,
        });
    }

    /// Remove any injected read fault.
    pub fn clear_read_fault(&mut self) {
        self.fault = None;
    }

    /// Word indices read so far, in access order.
    pub fn read_log(&self) -> &[u32] {
        &self.read_log
    }

    /// Word indices written so far, in access order.
    pub fn write_log(&self) -> &[u32] {
        &self.write_log
    }

    /// Clear the access logs.
    pub fn clear_logs(&mut self) {
        self.read_log.clear();
        self.write_log.clear();
    }
}

impl Bus for SramMacro {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        if size != RvSize::Word {
            return Err(BusError::LoadAccessFault);
        }
        let data = self.ram.read(size, addr)?;
        let index = addr / 4;
        self.read_log.push(index);
        match self.fault {
            Some(fault) if fault.word_index == index => Ok(data ^ fault.xor_mask),
            _ => Ok(data),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        if size != RvSize::Word {
            return Err(BusError::StoreAccessFault);
        }
        self.ram.write(size, addr, val)?;
        self.write_log.push(addr / 4);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_roundtrip() {
        let mut sram = SramMacro::new(16);
        assert_eq!(sram.words(), 16);
        sram.write(RvSize::Word, 8, 0x1234_5678).unwrap();
        assert_eq!(sram.read(RvSize::Word, 8).ok(), Some(0x1234_5678));
        assert_eq!(sram.write_log(), &[2]);
        assert_eq!(sram.read_log(), &[2]);
    }

    #[test]
    fn test_word_access_only() {
        let mut sram = SramMacro::new(4);
        assert_eq!(
            sram.read(RvSize::Byte, 0).err(),
            Some(BusError::LoadAccessFault)
        );
        assert_eq!(
            sram.write(RvSize::HalfWord, 0, 0).err(),
            Some(BusError::StoreAccessFault)
        );
    }

    #[test]
    fn test_out_of_range() {
        let mut sram = SramMacro::new(4);
        assert_eq!(
            sram.read(RvSize::Word, 16).err(),
            Some(BusError::LoadAccessFault)
        );
    }

    #[test]
    fn test_read_fault_injection() {
        let mut sram = SramMacro::new(8);
        sram.write(RvSize::Word, 3 * 4, 0xFFFF_0000).unwrap();
        sram.inject_read_fault(3, 0x0000_0001);
        assert_eq!(sram.read(RvSize::Word, 3 * 4).ok(), Some(0xFFFF_0001));
        // Other indices are unaffected
        assert_eq!(sram.read(RvSize::Word, 0).ok(), Some(0));
        sram.clear_read_fault();
        assert_eq!(sram.read(RvSize::Word, 3 * 4).ok(), Some(0xFFFF_0000));
    }
}
