/*++

Licensed under the Apache-2.0 license.

File Name:

    gpio.rs

Abstract:

    File contains the GPIO pad configuration block model. Pad modes are
    staged one register write at a time and only take effect when the
    transfer register is written, mirroring the two-phase configure/load
    protocol the firmware uses. The output registers drive the pad levels
    for management-owned output pads; the high-half register carries the
    two indicator bits the test flows report through.

--*/

use bitfield::bitfield;
use caravel_emu_bus::{Bus, BusError};
use caravel_emu_types::{RvAddr, RvData, RvSize};

bitfield! {
    /// Per-pad configuration word
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct PadConfig(u32);
    impl Debug;

    /// Pad is owned by the management core rather than the user project
    pub mgmt_owned, set_mgmt_owned: 0;

    /// Output driver enabled
    pub output_en, set_output_en: 1;

    /// Pad output is monitored by the management core
    pub monitored, set_monitored: 2;
}

/// GPIO pad configuration block
pub struct GpioPads {
    /// Staged pad configuration, not yet in effect
    staged: [u32; Self::NUM_PADS],

    /// Latched pad configuration
    latched: [u32; Self::NUM_PADS],

    /// Output levels for pads 0..32
    out_lo: u32,

    /// Output levels for pads 32..38
    out_hi: u32,
}

impl GpioPads {
    /// Number of user-facing pads
    pub const NUM_PADS: usize = 38;

    /// First pad reported through the high-half output register
    pub const HI_PAD_BASE: u32 = 32;

    /// Configuration transfer (load) register
    const ADDR_LOAD: RvAddr = 0x0000_0100;

    /// Output register for pads 0..32
    const ADDR_OUT_LO: RvAddr = 0x0000_0104;

    /// Output register for pads 32..38
    const ADDR_OUT_HI: RvAddr = 0x0000_0108;

    pub fn new() -> Self {
        Self {
            staged: [0; Self::NUM_PADS],
            latched: [0; Self::NUM_PADS],
            out_lo: 0,
            out_hi: 0,
        }
    }

    /// Memory map size.
    pub fn mmap_size(&self) -> RvAddr {
        0x10c
    }

    /// Latched (in-effect) configuration of `pad`.
    pub fn latched_config(&self, pad: usize) -> PadConfig {
        PadConfig(self.latched[pad])
    }

    /// Staged configuration of `pad`, which may not be in effect yet.
    pub fn staged_config(&self, pad: usize) -> PadConfig {
        PadConfig(self.staged[pad])
    }

    /// Value last written to the high-half output register. The test flows
    /// use the two low bits as a run/fail indicator code.
    pub fn out_hi_code(&self) -> u32 {
        self.out_hi
    }

    /// Level driven on `pad`, or `None` if its latched configuration does
    /// not enable the output driver.
    pub fn pad_level(&self, pad: usize) -> Option<bool> {
        if !self.latched_config(pad).output_en() {
            return None;
        }
        let level = if pad < Self::HI_PAD_BASE as usize {
            self.out_lo >> pad & 1
        } else {
            self.out_hi >> (pad - Self::HI_PAD_BASE as usize) & 1
        };
        Some(level != 0)
    }

    fn pad_for_addr(addr: RvAddr) -> Option<usize> {
        let pad = (addr / 4) as usize;
        (addr & 3 == 0 && pad < Self::NUM_PADS).then_some(pad)
    }
}

impl Default for GpioPads {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for GpioPads {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        if size != RvSize::Word {
            return Err(BusError::LoadAccessFault);
        }
        match addr {
            GpioPads::ADDR_LOAD => Ok(0),
            GpioPads::ADDR_OUT_LO => Ok(self.out_lo),
            GpioPads::ADDR_OUT_HI => Ok(self.out_hi),
            _ => match Self::pad_for_addr(addr) {
                Some(pad) => Ok(self.staged[pad]),
                None => Err(BusError::LoadAccessFault),
            },
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        if size != RvSize::Word {
            return Err(BusError::StoreAccessFault);
        }
        match addr {
            GpioPads::ADDR_LOAD => {
                self.latched = self.staged;
                Ok(())
            }
            GpioPads::ADDR_OUT_LO => {
                self.out_lo = val;
                Ok(())
            }
            GpioPads::ADDR_OUT_HI => {
                self.out_hi = val & 0x3f;
                Ok(())
            }
            _ => match Self::pad_for_addr(addr) {
                Some(pad) => {
                    self.staged[pad] = val;
                    Ok(())
                }
                None => Err(BusError::StoreAccessFault),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_load() {
        let mut pads = GpioPads::new();
        let mut cfg = PadConfig(0);
        cfg.set_mgmt_owned(true);
        cfg.set_output_en(true);
        pads.write(RvSize::Word, 32 * 4, cfg.0).unwrap();
        assert_eq!(pads.staged_config(32), cfg);
        assert_eq!(pads.latched_config(32), PadConfig(0));

        pads.write(RvSize::Word, 0x100, 1).unwrap();
        assert_eq!(pads.latched_config(32), cfg);
    }

    #[test]
    fn test_out_hi_drives_indicator_pads() {
        let mut pads = GpioPads::new();
        let mut cfg = PadConfig(0);
        cfg.set_mgmt_owned(true);
        cfg.set_output_en(true);
        pads.write(RvSize::Word, 32 * 4, cfg.0).unwrap();
        pads.write(RvSize::Word, 33 * 4, cfg.0).unwrap();
        pads.write(RvSize::Word, 0x100, 1).unwrap();

        pads.write(RvSize::Word, 0x108, 0b10).unwrap();
        assert_eq!(pads.out_hi_code(), 0b10);
        assert_eq!(pads.pad_level(32), Some(false));
        assert_eq!(pads.pad_level(33), Some(true));
    }

    #[test]
    fn test_unconfigured_pad_not_driven() {
        let mut pads = GpioPads::new();
        pads.write(RvSize::Word, 0x104, 0xffff_ffff).unwrap();
        assert_eq!(pads.pad_level(8), None);
    }

    #[test]
    fn test_bad_address() {
        let mut pads = GpioPads::new();
        assert_eq!(
            pads.write(RvSize::Word, 38 * 4, 0).err(),
            Some(BusError::StoreAccessFault)
        );
        assert_eq!(
            pads.read(RvSize::Byte, 0).err(),
            Some(BusError::LoadAccessFault)
        );
    }
}
