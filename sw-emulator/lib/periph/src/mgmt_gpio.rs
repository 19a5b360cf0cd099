/*++

Licensed under the Apache-2.0 license.

File Name:

    mgmt_gpio.rs

Abstract:

    File contains the management GPIO model. This is the single pin the
    firmware uses to report test phase and completion; the external bench
    waits on it, so every level change is recorded with its cycle for the
    harness to inspect.

--*/

use caravel_emu_bus::{Bus, BusError, Timer};
use caravel_emu_types::{RvAddr, RvData, RvSize};

/// A recorded management GPIO level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MgmtGpioEvent {
    /// Cycle at which the level was driven
    pub cycle: u64,

    /// Level driven
    pub level: bool,
}

/// Management GPIO device
pub struct MgmtGpio {
    /// Output driver enabled
    output_en: bool,

    /// Driven level
    out: bool,

    /// View of the simulation clock
    timer: Timer,

    /// Level changes in driven order
    events: Vec<MgmtGpioEvent>,
}

impl MgmtGpio {
    /// Output enable register
    const ADDR_OUTPUT_EN: RvAddr = 0x0000_0000;

    /// Output data register
    const ADDR_DATA: RvAddr = 0x0000_0004;

    /// Create a new management GPIO instance.
    ///
    /// # Arguments
    ///
    /// * `timer` - View of the simulation clock
    pub fn new(timer: Timer) -> Self {
        Self {
            output_en: false,
            out: false,
            timer,
            events: Vec::new(),
        }
    }

    /// Memory map size.
    pub fn mmap_size(&self) -> RvAddr {
        8
    }

    /// Observed pin level; `None` while the output driver is disabled.
    pub fn line(&self) -> Option<bool> {
        self.output_en.then_some(self.out)
    }

    /// Recorded level changes, oldest first.
    pub fn events(&self) -> &[MgmtGpioEvent] {
        &self.events
    }
}

impl Bus for MgmtGpio {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        match (size, addr) {
            (RvSize::Word, MgmtGpio::ADDR_OUTPUT_EN) => Ok(self.output_en as RvData),
            (RvSize::Word, MgmtGpio::ADDR_DATA) => Ok(self.out as RvData),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        match (size, addr) {
            (RvSize::Word, MgmtGpio::ADDR_OUTPUT_EN) => {
                self.output_en = val & 1 != 0;
            }
            (RvSize::Word, MgmtGpio::ADDR_DATA) => {
                let level = val & 1 != 0;
                self.events.push(MgmtGpioEvent {
                    cycle: self.timer.now(),
                    level,
                });
                self.out = level;
            }
            _ => Err(BusError::StoreAccessFault)?,
        }
        Ok(())
    }
}
