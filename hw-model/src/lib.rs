/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the hardware model interface. The model plays the role
    of the external test bench: it owns the simulated SoC, steps the
    clock, and observes the signaling pins while firmware flows run
    against the bus.

--*/

use std::error::Error;

use caravel_emu_periph::UserSocBus;

mod model_emulated;

pub use model_emulated::ModelEmulated;

/// Model initialization parameters
pub struct InitParams {
    /// Words per SRAM macro
    pub sram_words: u32,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            sram_words: UserSocBus::DEFAULT_SRAM_WORDS,
        }
    }
}

/// A simulation of the SoC, to be called from tests.
pub trait HwModel {
    fn init(params: InitParams) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;

    /// The simulated SoC as seen from the management core.
    fn soc(&mut self) -> &mut UserSocBus;

    /// Step execution ahead one clock cycle.
    fn step(&mut self);

    /// Number of simulated clock cycles that have elapsed.
    fn cycles(&self) -> u64;

    /// Execute until the result of `predicate` becomes true.
    fn step_until(&mut self, mut predicate: impl FnMut(&mut Self) -> bool) {
        while !predicate(self) {
            self.step();
        }
    }

    /// Level of the management GPIO, or `None` while it is not driven.
    fn mgmt_gpio(&mut self) -> Option<bool> {
        self.soc().mgmt_gpio.line()
    }

    /// Indicator code on the high-half output pads.
    fn indicator_code(&mut self) -> u32 {
        self.soc().pads.out_hi_code()
    }

    /// Level of timer `k`'s PWM0 output.
    fn pwm0_out(&mut self, k: usize) -> bool {
        self.soc().tmr32[k].pwm0_out()
    }
}
