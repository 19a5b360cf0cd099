/*++

Licensed under the Apache-2.0 license.

File Name:

    hk.rs

Abstract:

    File contains the firmware driver for the housekeeping block.

--*/

use crate::memmap;
use caravel_emu_bus::{Bus, BusError};
use caravel_emu_types::RvSize;

/// Housekeeping driver
pub struct Housekeeping;

impl Housekeeping {
    /// Enable or disable the housekeeping SPI.
    pub fn set_hk_spi_enabled(bus: &mut impl Bus, enabled: bool) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::HK_SPI_EN, enabled as u32)
    }

    /// Enable the user wishbone interface. Until this is done the user
    /// project window faults on every access.
    pub fn enable_user_if(bus: &mut impl Bus) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::HK_USER_IF_EN, 1)
    }
}
