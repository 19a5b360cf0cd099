/*++

Licensed under the Apache-2.0 license.

File Name:

    mem.rs

Abstract:

    File contains a helper data structure backing memory devices like the
    SRAM macros. All accesses are naturally aligned; wishbone-facing
    memories fault on misaligned access.

--*/

use crate::BusError;
use caravel_emu_types::{RvAddr, RvData, RvSize};

/// Memory Exception
#[derive(Debug, PartialEq, Eq)]
pub enum MemError {
    /// Read Address misaligned
    ReadAddrMisaligned,

    /// Read Access fault
    ReadAccessFault,

    /// Write Address misaligned
    WriteAddrMisaligned,

    /// Write access fault
    WriteAccessFault,
}

impl From<MemError> for BusError {
    fn from(error: MemError) -> BusError {
        match error {
            MemError::ReadAddrMisaligned => BusError::LoadAddrMisaligned,
            MemError::ReadAccessFault => BusError::LoadAccessFault,
            MemError::WriteAddrMisaligned => BusError::StoreAddrMisaligned,
            MemError::WriteAccessFault => BusError::StoreAccessFault,
        }
    }
}

/// Memory
pub struct Mem {
    /// Data storage
    data: Vec<u8>,
}

impl Mem {
    /// Create a new memory object
    ///
    /// # Arguments
    ///
    /// * `data` - Data contents for memory
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Size of the memory in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Immutable reference to data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable reference to data
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read data of specified size from given address. The address must be
    /// `size` aligned.
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the read
    /// * `addr` - Address to read from
    ///
    /// # Error
    ///
    /// * `MemError::ReadAddrMisaligned` - Read address is not `size` aligned
    /// * `MemError::ReadAccessFault` - Read from invalid or non existent address
    pub fn read(&self, size: RvSize, addr: RvAddr) -> Result<RvData, MemError> {
        let addr = addr as usize;
        let width = match size {
            RvSize::Invalid => return Err(MemError::ReadAccessFault),
            _ => usize::from(size),
        };
        if addr & (width - 1) != 0 {
            return Err(MemError::ReadAddrMisaligned);
        }
        let Some(bytes) = self.data.get(addr..addr + width) else {
            return Err(MemError::ReadAccessFault);
        };
        let mut val: RvData = 0;
        for (i, byte) in bytes.iter().enumerate() {
            val |= (*byte as RvData) << (i * 8);
        }
        Ok(val)
    }

    /// Write data of specified size to given address. The address must be
    /// `size` aligned.
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the write
    /// * `addr` - Address to write
    /// * `val` - Data to write
    ///
    /// # Error
    ///
    /// * `MemError::WriteAddrMisaligned` - Write address is not `size` aligned
    /// * `MemError::WriteAccessFault` - Write to invalid or non existent address
    pub fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), MemError> {
        let addr = addr as usize;
        let width = match size {
            RvSize::Invalid => return Err(MemError::WriteAccessFault),
            _ => usize::from(size),
        };
        if addr & (width - 1) != 0 {
            return Err(MemError::WriteAddrMisaligned);
        }
        let Some(bytes) = self.data.get_mut(addr..addr + width) else {
            return Err(MemError::WriteAccessFault);
        };
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (val >> (i * 8)) as u8;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let mem = Mem::new(Vec::new());
        assert_eq!(mem.len(), 0);
        assert!(mem.is_empty());

        let mem = Mem::new(vec![1, 2, 3]);
        assert_eq!(mem.len(), 3);
    }

    #[test]
    fn test_read() {
        let mem = Mem::new(vec![0x11, 0x22, 0x33, 0x44]);
        assert_eq!(mem.read(RvSize::Byte, 2).ok(), Some(0x33));
        assert_eq!(mem.read(RvSize::HalfWord, 2).ok(), Some(0x4433));
        assert_eq!(mem.read(RvSize::Word, 0).ok(), Some(0x4433_2211));
    }

    #[test]
    fn test_read_misaligned() {
        let mem = Mem::new(vec![0; 8]);
        assert_eq!(
            mem.read(RvSize::Word, 2).err(),
            Some(MemError::ReadAddrMisaligned)
        );
        assert_eq!(
            mem.read(RvSize::HalfWord, 1).err(),
            Some(MemError::ReadAddrMisaligned)
        );
    }

    #[test]
    fn test_read_out_of_bounds() {
        let mem = Mem::new(vec![0; 4]);
        assert_eq!(
            mem.read(RvSize::Word, 4).err(),
            Some(MemError::ReadAccessFault)
        );
        assert_eq!(
            mem.read(RvSize::Byte, 100).err(),
            Some(MemError::ReadAccessFault)
        );
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut mem = Mem::new(vec![0; 8]);
        assert_eq!(mem.write(RvSize::Word, 4, 0xCAFE_BABE).ok(), Some(()));
        assert_eq!(mem.read(RvSize::Word, 4).ok(), Some(0xCAFE_BABE));
        assert_eq!(mem.write(RvSize::Byte, 0, 0x1FF).ok(), Some(()));
        assert_eq!(mem.read(RvSize::Byte, 0).ok(), Some(0xFF));
    }

    #[test]
    fn test_write_misaligned() {
        let mut mem = Mem::new(vec![0; 8]);
        assert_eq!(
            mem.write(RvSize::Word, 1, 0).err(),
            Some(MemError::WriteAddrMisaligned)
        );
    }

    #[test]
    fn test_write_out_of_bounds() {
        let mut mem = Mem::new(vec![0; 4]);
        assert_eq!(
            mem.write(RvSize::Word, 4, 0).err(),
            Some(MemError::WriteAccessFault)
        );
    }
}
