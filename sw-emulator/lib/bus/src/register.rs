/*++

Licensed under the Apache-2.0 license.

File Name:

    register.rs

Abstract:

    File contains register types used by peripheral models. All CSRs in the
    user project are 32 bits wide and only respond to word accesses.

--*/

use crate::{Bus, BusError};
use caravel_emu_types::{RvAddr, RvData, RvSize};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;
use tock_registers::RegisterLongName;

pub trait Register {
    /// Read data of specified size from the register
    ///
    /// # Error
    ///
    /// * `BusError::LoadAccessFault` - Access size is not a word
    fn read(&self, size: RvSize) -> Result<RvData, BusError>;

    /// Write data of specified size to the register
    ///
    /// # Error
    ///
    /// * `BusError::StoreAccessFault` - Access size is not a word
    fn write(&mut self, size: RvSize, val: RvData) -> Result<(), BusError>;
}

/// Read Write register
pub struct ReadWriteRegister<R: RegisterLongName = ()> {
    pub reg: InMemoryRegister<u32, R>,
}

impl<R: RegisterLongName> ReadWriteRegister<R> {
    pub fn new(val: u32) -> Self {
        Self {
            reg: InMemoryRegister::new(val),
        }
    }
}

impl<R: RegisterLongName> Register for ReadWriteRegister<R> {
    fn read(&self, size: RvSize) -> Result<RvData, BusError> {
        match size {
            RvSize::Word => Ok(self.reg.get()),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, val: RvData) -> Result<(), BusError> {
        match size {
            RvSize::Word => {
                self.reg.set(val);
                Ok(())
            }
            _ => Err(BusError::StoreAccessFault),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let mut reg: ReadWriteRegister = ReadWriteRegister::new(0);
        assert_eq!(Register::write(&mut reg, RvSize::Word, 0xDEAD_BEEF).ok(), Some(()));
        assert_eq!(Register::read(&reg, RvSize::Word).ok(), Some(0xDEAD_BEEF));
    }

    #[test]
    fn test_word_access_only() {
        let mut reg: ReadWriteRegister = ReadWriteRegister::new(0);
        assert_eq!(
            Register::read(&reg, RvSize::Byte).err(),
            Some(BusError::LoadAccessFault)
        );
        assert_eq!(
            Register::write(&mut reg, RvSize::HalfWord, 0).err(),
            Some(BusError::StoreAccessFault)
        );
    }
}
