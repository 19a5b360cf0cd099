/*++

Licensed under the Apache-2.0 license.

File Name:

    ram.rs

Abstract:

    File contains implementation of RAM.

--*/

use crate::{mem::Mem, Bus, BusError};
use caravel_emu_types::{RvAddr, RvData, RvSize};

/// Random Access Memory Device
pub struct Ram {
    /// Data
    data: Mem,
}

impl Ram {
    /// Create new RAM
    ///
    /// # Arguments
    ///
    /// * `data` - Initial contents of the RAM
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Mem::new(data),
        }
    }

    /// Memory map size
    pub fn mmap_size(&self) -> RvAddr {
        self.data.len() as RvAddr
    }

    /// Immutable reference to the backing data
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Mutable reference to the backing data
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data.data_mut()
    }
}

impl Bus for Ram {
    /// Read data of specified size from given address
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        Ok(self.data.read(size, addr)?)
    }

    /// Write data of specified size to given address
    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        Ok(self.data.write(size, addr, val)?)
    }
}
