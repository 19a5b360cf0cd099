/*++

Licensed under the Apache-2.0 license.

File Name:

    sram.rs

Abstract:

    File contains the SRAM verification flow: the march test is run over
    each of the three SRAM macros in turn. Progress and outcome are
    reported on the indicator pads and the management GPIO; the external
    bench waits for the management GPIO to go high and then inspects the
    indicator code.

--*/

use crate::gpio::{Gpios, MgmtGpio};
use crate::hk::Housekeeping;
use crate::march::{MarchResult, MarchTest};
use crate::memmap;
use caravel_emu_bus::{Bus, BusError};

/// Indicator pads used by the verification flows
pub const INDICATOR_PADS: [u32; 2] = [32, 33];

/// Indicator code: test running
pub const INDICATOR_RUNNING: u32 = 0b10;

/// Indicator code: test failed
pub const INDICATOR_FAILED: u32 = 0b01;

/// Number of SRAM macros covered by the flow
pub const SRAM_COUNT: u32 = 3;

/// Run the march test over all three SRAM macros.
///
/// The management GPIO goes high when the flow is done; a pass leaves the
/// indicator code at `INDICATOR_RUNNING`, a failure latches
/// `INDICATOR_FAILED`. The first failing word is fatal to the whole run:
/// later words, partitions and macros are not touched.
///
/// # Arguments
///
/// * `bus` - Management-core bus
/// * `words_per_macro` - Words in each SRAM macro
pub fn sram_test(bus: &mut impl Bus, words_per_macro: u32) -> Result<(), BusError> {
    for pad in INDICATOR_PADS {
        Gpios::configure(bus, pad, memmap::GPIO_MODE_MGMT_STD_OUTPUT)?;
    }
    Gpios::load_configs(bus)?;
    Housekeeping::enable_user_if(bus)?;
    MgmtGpio::output_enable(bus)?;
    MgmtGpio::write(bus, false)?;
    Gpios::write_high(bus, INDICATOR_RUNNING)?;

    for j in 0..SRAM_COUNT {
        let test = MarchTest::new(memmap::sram_word_offset(j), words_per_macro);
        if let MarchResult::Mismatch { .. } = test.run(bus)? {
            Gpios::write_high(bus, INDICATOR_FAILED)?;
            MgmtGpio::write(bus, true)?;
            return Ok(());
        }
    }

    MgmtGpio::write(bus, true)?;
    Ok(())
}
