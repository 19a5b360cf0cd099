/*++

Licensed under the Apache-2.0 license.

File Name:

    gpio.rs

Abstract:

    File contains the firmware drivers for the GPIO pad configuration
    block and the management GPIO.

--*/

use crate::memmap;
use caravel_emu_bus::{Bus, BusError};
use caravel_emu_types::RvSize;

/// GPIO pad configuration driver
pub struct Gpios;

impl Gpios {
    /// Stage the mode word for a single pad. The new mode does not take
    /// effect until [`Gpios::load_configs`] is called.
    pub fn configure(bus: &mut impl Bus, pad: u32, mode: u32) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::GPIO_CFG_BASE + pad * 4, mode)
    }

    /// Stage the same mode word for every pad.
    pub fn configure_all(bus: &mut impl Bus, mode: u32) -> Result<(), BusError> {
        for pad in 0..memmap::NUM_PADS {
            Self::configure(bus, pad, mode)?;
        }
        Ok(())
    }

    /// Latch all staged pad modes into effect.
    pub fn load_configs(bus: &mut impl Bus) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::GPIO_CFG_LOAD, 1)
    }

    /// Drive the high-half output pads (32..38) with `code`. The test
    /// flows use the two low bits as their indicator code.
    pub fn write_high(bus: &mut impl Bus, code: u32) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::GPIO_OUT_HI, code)
    }

    /// Drive the low-half output pads (0..32) with `bits`.
    pub fn write_low(bus: &mut impl Bus, bits: u32) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::GPIO_OUT_LO, bits)
    }
}

/// Management GPIO driver
pub struct MgmtGpio;

impl MgmtGpio {
    /// Enable the output driver.
    pub fn output_enable(bus: &mut impl Bus) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::MGMT_GPIO_OUTPUT_EN, 1)
    }

    /// Drive the pin.
    pub fn write(bus: &mut impl Bus, level: bool) -> Result<(), BusError> {
        bus.write(RvSize::Word, memmap::MGMT_GPIO_DATA, level as u32)
    }
}
