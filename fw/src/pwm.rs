/*++

Licensed under the Apache-2.0 license.

File Name:

    pwm.rs

Abstract:

    File contains the CF_TMR32 firmware driver and the PWM verification
    flows. The servo flow reprograms all four timers through a tick
    schedule, toggling the management GPIO before each step so the bench
    can line up its measurements, and busy-waiting a caller-supplied
    delay between reconfigurations.

--*/

use crate::gpio::{Gpios, MgmtGpio};
use crate::hk::Housekeeping;
use crate::memmap;
use caravel_emu_bus::{Bus, BusError};
use caravel_emu_types::{RvAddr, RvSize};

/// CF_TMR32 configuration
#[derive(Debug, Clone, Copy)]
pub struct PwmConfig {
    pub reload: u32,
    pub prescale: u32,
    pub cmpx: u32,
    pub cmpy: u32,
    pub cfg: u32,
    pub pwm0_match: u32,
    pub pwm1_match: u32,
}

impl PwmConfig {
    /// Down-count, periodic
    pub const CFG_DOWN_PERIODIC: u32 = 0b110;

    /// Match actions used by all the flows
    pub const MATCH_ACTIONS: u32 = 0b0000_1000_0110;

    /// The canned example configuration: 20ms period at the servo clock
    /// with a 7.5% duty cycle.
    pub fn example() -> Self {
        Self::with_ticks(18_000)
    }

    /// Example configuration with the PWM0 high time set to `ticks`.
    pub fn with_ticks(ticks: u32) -> Self {
        Self {
            reload: 240_000,
            prescale: 0,
            cmpx: ticks,
            cmpy: 2_400_000,
            cfg: Self::CFG_DOWN_PERIODIC,
            pwm0_match: Self::MATCH_ACTIONS,
            pwm1_match: Self::MATCH_ACTIONS,
        }
    }
}

/// CF_TMR32 driver for one timer instance
pub struct PwmTimer {
    base: RvAddr,
}

impl PwmTimer {
    const OFFSET_RELOAD: RvAddr = 0x04;
    const OFFSET_PRESCALE: RvAddr = 0x08;
    const OFFSET_CMPX: RvAddr = 0x0c;
    const OFFSET_CMPY: RvAddr = 0x10;
    const OFFSET_CTRL: RvAddr = 0x14;
    const OFFSET_CFG: RvAddr = 0x18;
    const OFFSET_PWM0_MATCH: RvAddr = 0x1c;
    const OFFSET_PWM1_MATCH: RvAddr = 0x20;

    /// Timer enable with both PWM outputs
    const CTRL_ENABLE: u32 = 0b1101;

    /// Everything off
    const CTRL_DISABLE: u32 = 0;

    /// Driver for timer instance `k`.
    pub fn new(k: u32) -> Self {
        Self {
            base: memmap::tmr32_base(k),
        }
    }

    fn write_reg(&self, bus: &mut impl Bus, offset: RvAddr, val: u32) -> Result<(), BusError> {
        bus.write(RvSize::Word, self.base + offset, val)
    }

    /// Stop the timer and both PWM outputs.
    pub fn disable(&self, bus: &mut impl Bus) -> Result<(), BusError> {
        self.write_reg(bus, Self::OFFSET_CTRL, Self::CTRL_DISABLE)
    }

    /// Start the timer and both PWM outputs.
    pub fn enable(&self, bus: &mut impl Bus) -> Result<(), BusError> {
        self.write_reg(bus, Self::OFFSET_CTRL, Self::CTRL_ENABLE)
    }

    /// Program `config` and start the timer. The timer is stopped while
    /// the registers are written and re-enabled last.
    pub fn configure(&self, bus: &mut impl Bus, config: &PwmConfig) -> Result<(), BusError> {
        self.disable(bus)?;
        self.write_reg(bus, Self::OFFSET_RELOAD, config.reload)?;
        self.write_reg(bus, Self::OFFSET_PRESCALE, config.prescale)?;
        self.write_reg(bus, Self::OFFSET_CFG, config.cfg)?;
        self.write_reg(bus, Self::OFFSET_CMPX, config.cmpx)?;
        self.write_reg(bus, Self::OFFSET_CMPY, config.cmpy)?;
        self.write_reg(bus, Self::OFFSET_PWM0_MATCH, config.pwm0_match)?;
        self.write_reg(bus, Self::OFFSET_PWM1_MATCH, config.pwm1_match)?;
        self.enable(bus)
    }
}

/// Number of timers driven by the multi-instance flow
pub const PWM_TEST_TIMERS: u32 = 3;

/// Monitored pads carrying the PWM outputs in the multi-instance flow
pub const PWM_TEST_PADS: core::ops::RangeInclusive<u32> = 8..=13;

/// Configure and start timers 0..3 with the example PWM configuration,
/// with their output pads monitored by the bench.
pub fn pwm_test(bus: &mut impl Bus) -> Result<(), BusError> {
    MgmtGpio::output_enable(bus)?;
    MgmtGpio::write(bus, false)?;
    Housekeeping::set_hk_spi_enabled(bus, false)?;
    for pad in PWM_TEST_PADS {
        Gpios::configure(bus, pad, memmap::GPIO_MODE_USER_STD_OUT_MONITORED)?;
    }
    Gpios::load_configs(bus)?;
    Housekeeping::enable_user_if(bus)?;
    MgmtGpio::write(bus, true)?;

    for k in 0..PWM_TEST_TIMERS {
        PwmTimer::new(k).configure(bus, &PwmConfig::example())?;
    }
    Ok(())
}

/// Configure and start a single timer instance with the example PWM
/// configuration (the per-instance variants of the multi-instance flow).
pub fn pwm_single_test(bus: &mut impl Bus, k: u32) -> Result<(), BusError> {
    MgmtGpio::output_enable(bus)?;
    MgmtGpio::write(bus, false)?;
    Housekeeping::set_hk_spi_enabled(bus, false)?;
    Gpios::configure(bus, 8, memmap::GPIO_MODE_USER_STD_OUTPUT)?;
    Gpios::configure(bus, 9, memmap::GPIO_MODE_USER_STD_OUTPUT)?;
    Gpios::load_configs(bus)?;
    Housekeeping::enable_user_if(bus)?;
    MgmtGpio::write(bus, true)?;

    PwmTimer::new(k).configure(bus, &PwmConfig::example())
}

/// Busy-wait cycles between servo reconfigurations
pub const SERVO_DELAY_CYCLES: u32 = 800_000;

/// Management GPIO level and PWM0 high time for each servo step
pub const SERVO_SCHEDULE: [(bool, u32); 4] = [
    (false, 18_000),
    (true, 6_000),
    (false, 18_000),
    (true, 30_000),
];

/// Sweep all four timers through the servo tick schedule.
///
/// # Arguments
///
/// * `bus` - Management-core bus
/// * `delay` - Busy-wait for the given number of cycles
pub fn pwm_servo_test(
    bus: &mut impl Bus,
    delay: &mut impl FnMut(u32),
) -> Result<(), BusError> {
    MgmtGpio::output_enable(bus)?;
    MgmtGpio::write(bus, false)?;
    Housekeeping::set_hk_spi_enabled(bus, false)?;
    Gpios::configure_all(bus, memmap::GPIO_MODE_USER_STD_OUTPUT)?;
    Gpios::load_configs(bus)?;
    Housekeeping::enable_user_if(bus)?;
    MgmtGpio::write(bus, true)?;

    for (level, ticks) in SERVO_SCHEDULE {
        MgmtGpio::write(bus, level)?;
        for k in 0..4 {
            PwmTimer::new(k).configure(bus, &PwmConfig::with_ticks(ticks))?;
        }
        delay(SERVO_DELAY_CYCLES);
    }
    MgmtGpio::write(bus, false)
}
