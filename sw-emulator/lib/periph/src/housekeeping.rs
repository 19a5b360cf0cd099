/*++

Licensed under the Apache-2.0 license.

File Name:

    housekeeping.rs

Abstract:

    File contains the housekeeping block model: the housekeeping SPI enable
    and the user wishbone interface enable. The root bus refuses accesses
    to the user project window until the interface is enabled.

--*/

use caravel_emu_bus::{Bus, BusError};
use caravel_emu_types::{RvAddr, RvData, RvSize};

/// Housekeeping block
pub struct Housekeeping {
    /// Housekeeping SPI enabled (set out of reset)
    hk_spi_en: bool,

    /// User wishbone interface enabled
    user_if_en: bool,
}

impl Housekeeping {
    /// Housekeeping SPI enable register
    const ADDR_HK_SPI_EN: RvAddr = 0x0000_0000;

    /// User interface enable register
    const ADDR_USER_IF_EN: RvAddr = 0x0000_0004;

    pub fn new() -> Self {
        Self {
            hk_spi_en: true,
            user_if_en: false,
        }
    }

    /// Memory map size.
    pub fn mmap_size(&self) -> RvAddr {
        8
    }

    /// True if the housekeeping SPI is enabled.
    pub fn hk_spi_enabled(&self) -> bool {
        self.hk_spi_en
    }

    /// True if the user wishbone interface is enabled.
    pub fn user_if_enabled(&self) -> bool {
        self.user_if_en
    }
}

impl Default for Housekeeping {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Housekeeping {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        match (size, addr) {
            (RvSize::Word, Housekeeping::ADDR_HK_SPI_EN) => Ok(self.hk_spi_en as RvData),
            (RvSize::Word, Housekeeping::ADDR_USER_IF_EN) => Ok(self.user_if_en as RvData),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        match (size, addr) {
            (RvSize::Word, Housekeeping::ADDR_HK_SPI_EN) => self.hk_spi_en = val & 1 != 0,
            (RvSize::Word, Housekeeping::ADDR_USER_IF_EN) => self.user_if_en = val & 1 != 0,
            _ => Err(BusError::StoreAccessFault)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let hk = Housekeeping::new();
        assert!(hk.hk_spi_enabled());
        assert!(!hk.user_if_enabled());
    }

    #[test]
    fn test_enable_user_if() {
        let mut hk = Housekeeping::new();
        hk.write(RvSize::Word, 0x4, 1).unwrap();
        assert!(hk.user_if_enabled());
        assert_eq!(hk.read(RvSize::Word, 0x4).ok(), Some(1));
    }

    #[test]
    fn test_disable_hk_spi() {
        let mut hk = Housekeeping::new();
        hk.write(RvSize::Word, 0x0, 0).unwrap();
        assert!(!hk.hk_spi_enabled());
    }
}
