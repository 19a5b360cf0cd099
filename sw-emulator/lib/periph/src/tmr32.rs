/*++

Licensed under the Apache-2.0 license.

File Name:

    tmr32.rs

Abstract:

    File contains the CF_TMR32 timer/PWM model. The timer counts at the
    prescaled clock rate while enabled; the two PWM outputs are derived
    from the CMPX/CMPY comparisons. The match-action registers are stored
    but the model derives output levels from the compare values alone.

--*/

use caravel_emu_bus::{Bus, BusError, ReadWriteRegister, Register, Timer};
use caravel_emu_types::{RvAddr, RvData, RvSize};
use tock_registers::interfaces::Readable;
use tock_registers::register_bitfields;

register_bitfields! [
    u32,

    /// Control Register Fields
    pub Ctrl [
        TE OFFSET(0) NUMBITS(1) [],
        TS OFFSET(1) NUMBITS(1) [],
        P0E OFFSET(2) NUMBITS(1) [],
        P1E OFFSET(3) NUMBITS(1) [],
    ],

    /// Configuration Register Fields
    pub Cfg [
        DIR OFFSET(0) NUMBITS(2) [
            None = 0b00,
            Up = 0b01,
            Down = 0b10,
            UpDown = 0b11,
        ],
        P OFFSET(2) NUMBITS(1) [],
    ],
];

/// CF_TMR32 timer/PWM device
pub struct Tmr32 {
    /// Timer reload value
    reload: ReadWriteRegister,

    /// Clock prescaler
    prescale: ReadWriteRegister,

    /// PWM0 compare value
    cmpx: ReadWriteRegister,

    /// PWM1 compare value
    cmpy: ReadWriteRegister,

    /// Control register
    ctrl: ReadWriteRegister<Ctrl::Register>,

    /// Configuration register
    cfg: ReadWriteRegister<Cfg::Register>,

    /// PWM0 match action register
    pwm0_match: ReadWriteRegister,

    /// PWM1 match action register
    pwm1_match: ReadWriteRegister,

    /// View of the simulation clock
    timer: Timer,

    /// Prescaled ticks elapsed since the timer was enabled
    ticks: u64,

    /// Clock cycle accounted for by `ticks`
    last_cycle: u64,
}

impl Tmr32 {
    /// Current timer value register
    const ADDR_TMR: RvAddr = 0x0000_0000;

    /// Reload register
    const ADDR_RELOAD: RvAddr = 0x0000_0004;

    /// Prescale register
    const ADDR_PRESCALE: RvAddr = 0x0000_0008;

    /// PWM0 compare register
    const ADDR_CMPX: RvAddr = 0x0000_000c;

    /// PWM1 compare register
    const ADDR_CMPY: RvAddr = 0x0000_0010;

    /// Control register
    const ADDR_CTRL: RvAddr = 0x0000_0014;

    /// Configuration register
    const ADDR_CFG: RvAddr = 0x0000_0018;

    /// PWM0 match action register
    const ADDR_PWM0_MATCH: RvAddr = 0x0000_001c;

    /// PWM1 match action register
    const ADDR_PWM1_MATCH: RvAddr = 0x0000_0020;

    /// Create a new timer instance.
    ///
    /// # Arguments
    ///
    /// * `timer` - View of the simulation clock
    pub fn new(timer: Timer) -> Self {
        Self {
            reload: ReadWriteRegister::new(0),
            prescale: ReadWriteRegister::new(0),
            cmpx: ReadWriteRegister::new(0),
            cmpy: ReadWriteRegister::new(0),
            ctrl: ReadWriteRegister::new(0),
            cfg: ReadWriteRegister::new(0),
            pwm0_match: ReadWriteRegister::new(0),
            pwm1_match: ReadWriteRegister::new(0),
            timer,
            ticks: 0,
            last_cycle: 0,
        }
    }

    /// Memory map size.
    pub fn mmap_size(&self) -> RvAddr {
        0x28
    }

    /// True if the timer is enabled.
    pub fn is_enabled(&self) -> bool {
        self.ctrl.reg.is_set(Ctrl::TE)
    }

    /// Current counter value derived from the elapsed prescaled ticks.
    pub fn counter(&self) -> u32 {
        let reload = self.reload.reg.get() as u64;
        let span = reload + 1;
        match self.cfg.reg.read_as_enum(Cfg::DIR) {
            Some(Cfg::DIR::Value::Up) => (self.ticks % span) as u32,
            Some(Cfg::DIR::Value::Down) => (reload - self.ticks % span) as u32,
            Some(Cfg::DIR::Value::UpDown) => {
                let period = (2 * reload).max(1);
                let pos = self.ticks % period;
                if pos <= reload {
                    pos as u32
                } else {
                    (2 * reload - pos) as u32
                }
            }
            _ => 0,
        }
    }

    /// Level of the PWM0 output pin.
    pub fn pwm0_out(&self) -> bool {
        self.is_enabled()
            && self.ctrl.reg.is_set(Ctrl::P0E)
            && self.counter() < self.cmpx.reg.get()
    }

    /// Level of the PWM1 output pin.
    pub fn pwm1_out(&self) -> bool {
        self.is_enabled()
            && self.ctrl.reg.is_set(Ctrl::P1E)
            && self.counter() < self.cmpy.reg.get()
    }

    fn write_ctrl(&mut self, size: RvSize, val: RvData) -> Result<(), BusError> {
        let was_enabled = self.is_enabled();
        Register::write(&mut self.ctrl, size, val)?;
        if self.is_enabled() && !was_enabled {
            // Counting restarts whenever the timer is re-enabled
            self.ticks = 0;
            self.last_cycle = self.timer.now();
        }
        Ok(())
    }
}

impl Bus for Tmr32 {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        match addr {
            Tmr32::ADDR_TMR => match size {
                RvSize::Word => Ok(self.counter()),
                _ => Err(BusError::LoadAccessFault),
            },
            Tmr32::ADDR_RELOAD => Register::read(&self.reload, size),
            Tmr32::ADDR_PRESCALE => Register::read(&self.prescale, size),
            Tmr32::ADDR_CMPX => Register::read(&self.cmpx, size),
            Tmr32::ADDR_CMPY => Register::read(&self.cmpy, size),
            Tmr32::ADDR_CTRL => Register::read(&self.ctrl, size),
            Tmr32::ADDR_CFG => Register::read(&self.cfg, size),
            Tmr32::ADDR_PWM0_MATCH => Register::read(&self.pwm0_match, size),
            Tmr32::ADDR_PWM1_MATCH => Register::read(&self.pwm1_match, size),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        match addr {
            Tmr32::ADDR_RELOAD => Register::write(&mut self.reload, size, val),
            Tmr32::ADDR_PRESCALE => Register::write(&mut self.prescale, size, val),
            Tmr32::ADDR_CMPX => Register::write(&mut self.cmpx, size, val),
            Tmr32::ADDR_CMPY => Register::write(&mut self.cmpy, size, val),
            Tmr32::ADDR_CTRL => self.write_ctrl(size, val),
            Tmr32::ADDR_CFG => Register::write(&mut self.cfg, size, val),
            Tmr32::ADDR_PWM0_MATCH => Register::write(&mut self.pwm0_match, size, val),
            Tmr32::ADDR_PWM1_MATCH => Register::write(&mut self.pwm1_match, size, val),
            _ => Err(BusError::StoreAccessFault),
        }
    }

    fn poll(&mut self) {
        if !self.is_enabled() {
            self.last_cycle = self.timer.now();
            return;
        }
        let prescale = self.prescale.reg.get() as u64 + 1;
        let elapsed = self.timer.now().saturating_sub(self.last_cycle);
        let new_ticks = elapsed / prescale;
        self.ticks += new_ticks;
        self.last_cycle += new_ticks * prescale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravel_emu_bus::Clock;

    fn enabled_timer(clock: &Clock, reload: u32, cmpx: u32) -> Tmr32 {
        let mut tmr = Tmr32::new(clock.timer());
        tmr.write(RvSize::Word, Tmr32::ADDR_RELOAD, reload).unwrap();
        tmr.write(RvSize::Word, Tmr32::ADDR_PRESCALE, 0).unwrap();
        tmr.write(RvSize::Word, Tmr32::ADDR_CMPX, cmpx).unwrap();
        tmr.write(RvSize::Word, Tmr32::ADDR_CFG, 0b110).unwrap();
        tmr.write(RvSize::Word, Tmr32::ADDR_CTRL, 0b1101).unwrap();
        tmr
    }

    #[test]
    fn test_disabled_timer_does_not_count() {
        let clock = Clock::new();
        let mut tmr = Tmr32::new(clock.timer());
        tmr.write(RvSize::Word, Tmr32::ADDR_RELOAD, 100).unwrap();
        clock.increment(50);
        tmr.poll();
        assert!(!tmr.is_enabled());
        assert!(!tmr.pwm0_out());
    }

    #[test]
    fn test_down_count() {
        let clock = Clock::new();
        let mut tmr = enabled_timer(&clock, 100, 10);
        assert_eq!(tmr.counter(), 100);
        clock.increment(30);
        tmr.poll();
        assert_eq!(tmr.counter(), 70);
        assert_eq!(tmr.read(RvSize::Word, Tmr32::ADDR_TMR).ok(), Some(70));
    }

    #[test]
    fn test_down_count_wraps() {
        let clock = Clock::new();
        let mut tmr = enabled_timer(&clock, 100, 10);
        clock.increment(101 + 5);
        tmr.poll();
        assert_eq!(tmr.counter(), 95);
    }

    #[test]
    fn test_prescale_divides_rate() {
        let clock = Clock::new();
        let mut tmr = enabled_timer(&clock, 1000, 10);
        tmr.write(RvSize::Word, Tmr32::ADDR_PRESCALE, 3).unwrap();
        clock.increment(40);
        tmr.poll();
        assert_eq!(tmr.counter(), 1000 - 10);
    }

    #[test]
    fn test_pwm0_duty_cycle() {
        let clock = Clock::new();
        let mut tmr = enabled_timer(&clock, 100, 10);
        // Down-count from 100; output goes high once counter drops below cmpx
        assert!(!tmr.pwm0_out());
        clock.increment(95);
        tmr.poll();
        assert_eq!(tmr.counter(), 5);
        assert!(tmr.pwm0_out());
        clock.increment(20);
        tmr.poll();
        assert!(!tmr.pwm0_out());
    }

    #[test]
    fn test_reenable_restarts_count() {
        let clock = Clock::new();
        let mut tmr = enabled_timer(&clock, 100, 10);
        clock.increment(40);
        tmr.poll();
        assert_eq!(tmr.counter(), 60);
        tmr.write(RvSize::Word, Tmr32::ADDR_CTRL, 0).unwrap();
        clock.increment(10);
        tmr.poll();
        tmr.write(RvSize::Word, Tmr32::ADDR_CTRL, 0b1101).unwrap();
        tmr.poll();
        assert_eq!(tmr.counter(), 100);
    }
}
