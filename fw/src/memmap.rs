/*++

Licensed under the Apache-2.0 license.

File Name:

    memmap.rs

Abstract:

    File contains the management-core address map of the user project and
    the pad configuration mode words used by the verification flows.

--*/

use caravel_emu_types::RvAddr;

/// Management GPIO block
pub const MGMT_GPIO_BASE: RvAddr = 0x2100_0000;

/// Management GPIO output enable register
pub const MGMT_GPIO_OUTPUT_EN: RvAddr = MGMT_GPIO_BASE;

/// Management GPIO output data register
pub const MGMT_GPIO_DATA: RvAddr = MGMT_GPIO_BASE + 0x4;

/// GPIO pad configuration block; pad `i` config register at `+ 4 * i`
pub const GPIO_CFG_BASE: RvAddr = 0x2600_0000;

/// Pad configuration transfer register
pub const GPIO_CFG_LOAD: RvAddr = GPIO_CFG_BASE + 0x100;

/// Output register for pads 0..32
pub const GPIO_OUT_LO: RvAddr = GPIO_CFG_BASE + 0x104;

/// Output register for pads 32..38
pub const GPIO_OUT_HI: RvAddr = GPIO_CFG_BASE + 0x108;

/// Housekeeping block
pub const HK_BASE: RvAddr = 0x2610_0000;

/// Housekeeping SPI enable register
pub const HK_SPI_EN: RvAddr = HK_BASE;

/// User wishbone interface enable register
pub const HK_USER_IF_EN: RvAddr = HK_BASE + 0x4;

/// User project window; peripherals are spaced `0x1_0000` bytes apart
pub const USER_BASE: RvAddr = 0x3000_0000;

/// CF_TMR32 instance `k` base address (4 instances)
pub const fn tmr32_base(k: u32) -> RvAddr {
    USER_BASE + k * 0x1_0000
}

/// Word offset of SRAM macro `j` within the user window (3 macros)
pub const fn sram_word_offset(j: u32) -> u32 {
    0x1_0000 + j * 0x4000
}

/// Byte address of the user window word at `word_index`
pub const fn user_word_addr(word_index: u32) -> RvAddr {
    USER_BASE + word_index * 4
}

/// Number of user-facing pads
pub const NUM_PADS: u32 = 38;

/// Pad mode: management-owned push-pull output
pub const GPIO_MODE_MGMT_STD_OUTPUT: u32 = 0b011;

/// Pad mode: user-owned push-pull output
pub const GPIO_MODE_USER_STD_OUTPUT: u32 = 0b010;

/// Pad mode: user-owned output, monitored by the management core
pub const GPIO_MODE_USER_STD_OUT_MONITORED: u32 = 0b110;
