/*++

Licensed under the Apache-2.0 license.

File Name:

    model_emulated.rs

Abstract:

    File contains the software-emulated hardware model.

--*/

use std::error::Error;

use caravel_emu_bus::{Bus, BusError, Clock};
use caravel_emu_periph::{UserSocBus, UserSocBusArgs};

use crate::{HwModel, InitParams};

/// Hardware model backed by the software-emulated SoC
pub struct ModelEmulated {
    clock: Clock,
    soc: UserSocBus,
}

impl ModelEmulated {
    /// Run the SRAM verification flow against the model.
    pub fn run_sram_test(&mut self, words_per_macro: u32) -> Result<(), BusError> {
        caravel_verif_fw::sram::sram_test(&mut self.soc, words_per_macro)
    }

    /// Run the multi-instance PWM flow against the model.
    pub fn run_pwm_test(&mut self) -> Result<(), BusError> {
        caravel_verif_fw::pwm::pwm_test(&mut self.soc)
    }

    /// Run the single-instance PWM flow for timer `k`.
    pub fn run_pwm_single_test(&mut self, k: u32) -> Result<(), BusError> {
        caravel_verif_fw::pwm::pwm_single_test(&mut self.soc, k)
    }

    /// Run the servo sweep flow. The firmware's busy-wait delays advance
    /// the simulated clock.
    pub fn run_pwm_servo_test(&mut self) -> Result<(), BusError> {
        let clock = self.clock.clone();
        let mut delay = |cycles: u32| clock.increment(cycles as u64);
        caravel_verif_fw::pwm::pwm_servo_test(&mut self.soc, &mut delay)?;
        self.soc.poll();
        Ok(())
    }
}

impl HwModel for ModelEmulated {
    fn init(params: InitParams) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized,
    {
        let clock = Clock::new();
        let soc = UserSocBus::new(
            &clock,
            UserSocBusArgs {
                sram_words: params.sram_words,
            },
        );
        Ok(Self { clock, soc })
    }

    fn soc(&mut self) -> &mut UserSocBus {
        &mut self.soc
    }

    fn step(&mut self) {
        self.clock.increment(1);
        self.soc.poll();
    }

    fn cycles(&self) -> u64 {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_advances_clock() {
        let mut model = ModelEmulated::init(InitParams::default()).unwrap();
        assert_eq!(model.cycles(), 0);
        model.step();
        model.step();
        assert_eq!(model.cycles(), 2);
    }

    #[test]
    fn test_step_until() {
        let mut model = ModelEmulated::init(InitParams::default()).unwrap();
        model.step_until(|m| m.cycles() >= 10);
        assert_eq!(model.cycles(), 10);
    }
}
