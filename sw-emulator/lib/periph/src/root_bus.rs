/*++

Licensed under the Apache-2.0 license.

File Name:

    root_bus.rs

Abstract:

    File contains the root bus of the emulated SoC: the management-core
    view of the management peripherals and the user project window. The
    user window holds four CF_TMR32 timers and three SRAM macros and is
    gated on the housekeeping user-interface enable.

--*/

use crate::{GpioPads, Housekeeping, MgmtGpio, SramMacro, Tmr32};
use caravel_emu_bus::{Bus, BusError, Clock};
use caravel_emu_types::{RvAddr, RvData, RvSize};

/// Arguments for initializing the root bus
pub struct UserSocBusArgs {
    /// Words per SRAM macro
    pub sram_words: u32,
}

impl Default for UserSocBusArgs {
    fn default() -> Self {
        Self {
            sram_words: UserSocBus::DEFAULT_SRAM_WORDS,
        }
    }
}

/// Root bus of the emulated SoC
pub struct UserSocBus {
    /// Management GPIO
    pub mgmt_gpio: MgmtGpio,

    /// Housekeeping block
    pub housekeeping: Housekeeping,

    /// GPIO pad configuration block
    pub pads: GpioPads,

    /// CF_TMR32 timer instances
    pub tmr32: [Tmr32; Self::TMR32_COUNT],

    /// SRAM macros
    pub sram: [SramMacro; Self::SRAM_COUNT],
}

impl UserSocBus {
    /// Number of CF_TMR32 instances in the user project
    pub const TMR32_COUNT: usize = 4;

    /// Number of SRAM macros in the user project
    pub const SRAM_COUNT: usize = 3;

    /// Words per SRAM macro in the default configuration
    pub const DEFAULT_SRAM_WORDS: u32 = 1024;

    /// Management GPIO base address
    pub const MGMT_GPIO_BASE: RvAddr = 0x2100_0000;

    /// GPIO pad configuration base address
    pub const GPIO_BASE: RvAddr = 0x2600_0000;

    /// Housekeeping base address
    pub const HK_BASE: RvAddr = 0x2610_0000;

    /// User project window base address
    pub const USER_BASE: RvAddr = 0x3000_0000;

    /// Stride between peripheral instances in the user window
    pub const USER_STRIDE: RvAddr = 0x0001_0000;

    /// Offset of the first SRAM macro within the user window
    pub const SRAM_WINDOW_OFFSET: RvAddr = 0x0004_0000;

    /// Create a new root bus.
    ///
    /// # Arguments
    ///
    /// * `clock` - Simulation clock
    /// * `args` - Bus configuration
    pub fn new(clock: &Clock, args: UserSocBusArgs) -> Self {
        Self {
            mgmt_gpio: MgmtGpio::new(clock.timer()),
            housekeeping: Housekeeping::new(),
            pads: GpioPads::new(),
            tmr32: [
                Tmr32::new(clock.timer()),
                Tmr32::new(clock.timer()),
                Tmr32::new(clock.timer()),
                Tmr32::new(clock.timer()),
            ],
            sram: [
                SramMacro::new(args.sram_words),
                SramMacro::new(args.sram_words),
                SramMacro::new(args.sram_words),
            ],
        }
    }

    /// Base address of timer instance `k`.
    pub fn tmr32_base(k: usize) -> RvAddr {
        Self::USER_BASE + k as RvAddr * Self::USER_STRIDE
    }

    /// Base address of SRAM macro `j`.
    pub fn sram_base(j: usize) -> RvAddr {
        Self::USER_BASE + Self::SRAM_WINDOW_OFFSET + j as RvAddr * Self::USER_STRIDE
    }

    fn user_device(&mut self, addr: RvAddr) -> Option<(&mut dyn Bus, RvAddr)> {
        let offset = addr - Self::USER_BASE;
        let slot = (offset / Self::USER_STRIDE) as usize;
        let offset = offset % Self::USER_STRIDE;
        match slot {
            0..=3 => {
                let tmr = &mut self.tmr32[slot];
                (offset < tmr.mmap_size()).then_some((tmr as &mut dyn Bus, offset))
            }
            4..=6 => {
                let sram = &mut self.sram[slot - 4];
                (offset < sram.mmap_size()).then_some((sram as &mut dyn Bus, offset))
            }
            _ => None,
        }
    }

    fn device(&mut self, addr: RvAddr, is_load: bool) -> Result<(&mut dyn Bus, RvAddr), BusError> {
        let err = if is_load {
            BusError::LoadAccessFault
        } else {
            BusError::StoreAccessFault
        };
        match addr {
            _ if (Self::MGMT_GPIO_BASE..Self::MGMT_GPIO_BASE + self.mgmt_gpio.mmap_size())
                .contains(&addr) =>
            {
                let offset = addr - Self::MGMT_GPIO_BASE;
                Ok((&mut self.mgmt_gpio, offset))
            }
            _ if (Self::GPIO_BASE..Self::GPIO_BASE + self.pads.mmap_size()).contains(&addr) => {
                let offset = addr - Self::GPIO_BASE;
                Ok((&mut self.pads, offset))
            }
            _ if (Self::HK_BASE..Self::HK_BASE + self.housekeeping.mmap_size())
                .contains(&addr) =>
            {
                let offset = addr - Self::HK_BASE;
                Ok((&mut self.housekeeping, offset))
            }
            _ if addr >= Self::USER_BASE => {
                // The user window is inaccessible until firmware enables the
                // user wishbone interface
                if !self.housekeeping.user_if_enabled() {
                    return Err(err);
                }
                self.user_device(addr).ok_or(err)
            }
            _ => Err(err),
        }
    }
}

impl Bus for UserSocBus {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        let (dev, offset) = self.device(addr, true)?;
        dev.read(size, offset)
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        let (dev, offset) = self.device(addr, false)?;
        dev.write(size, offset, val)
    }

    fn poll(&mut self) {
        for tmr in self.tmr32.iter_mut() {
            tmr.poll();
        }
    }
}
