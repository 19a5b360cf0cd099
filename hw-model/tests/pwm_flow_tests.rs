// Licensed under the Apache-2.0 license

//! Integration tests for the PWM flows: the model-side equivalent of the
//! bench sampling the monitored pads for toggling outputs.

use caravel_hw_model::{HwModel, InitParams, ModelEmulated};
use caravel_verif_fw::pwm::{PWM_TEST_TIMERS, SERVO_DELAY_CYCLES};

#[test]
fn test_pwm_outputs_toggle() {
    let mut m = ModelEmulated::init(InitParams::default()).unwrap();
    m.run_pwm_test().unwrap();
    assert_eq!(m.mgmt_gpio(), Some(true));

    // One full period of the example configuration is 240_001 cycles
    let mut high_seen = [false; PWM_TEST_TIMERS as usize];
    let mut low_seen = [false; PWM_TEST_TIMERS as usize];
    for _ in 0..250_000 {
        m.step();
        for k in 0..PWM_TEST_TIMERS as usize {
            if m.pwm0_out(k) {
                high_seen[k] = true;
            } else {
                low_seen[k] = true;
            }
        }
    }
    assert_eq!(high_seen, [true; PWM_TEST_TIMERS as usize]);
    assert_eq!(low_seen, [true; PWM_TEST_TIMERS as usize]);

    // The flow leaves the fourth timer alone
    assert!(!m.soc().tmr32[3].is_enabled());
}

#[test]
fn test_pwm_single_instance() {
    let mut m = ModelEmulated::init(InitParams::default()).unwrap();
    m.run_pwm_single_test(2).unwrap();
    assert_eq!(m.mgmt_gpio(), Some(true));

    assert!(m.soc().tmr32[2].is_enabled());
    for k in [0, 1, 3] {
        assert!(!m.soc().tmr32[k].is_enabled());
    }
}

#[test]
fn test_servo_sweep_phases() {
    let mut m = ModelEmulated::init(InitParams::default()).unwrap();
    m.run_pwm_servo_test().unwrap();

    let events = m.soc().mgmt_gpio.events().to_vec();
    let levels: Vec<bool> = events.iter().map(|e| e.level).collect();
    // Setup low/high, one toggle per schedule step, low at the end
    assert_eq!(
        levels,
        vec![false, true, false, true, false, true, false]
    );

    // Each step is separated by the firmware's busy-wait
    let step = SERVO_DELAY_CYCLES as u64;
    let cycles: Vec<u64> = events.iter().map(|e| e.cycle).collect();
    assert_eq!(cycles, vec![0, 0, 0, step, 2 * step, 3 * step, 4 * step]);

    // All four timers end up programmed with the final tick count
    for k in 0..4 {
        assert!(m.soc().tmr32[k].is_enabled());
    }
    assert_eq!(m.mgmt_gpio(), Some(false));
}
