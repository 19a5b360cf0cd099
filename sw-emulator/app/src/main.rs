/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains the main entrypoint for the Caravel user project
    emulator. Runs one verification flow against the emulated SoC and
    reports the signal outcome the way the external bench would observe
    it; the exit code reflects pass/fail.

--*/

use caravel_hw_model::{HwModel, InitParams, ModelEmulated};
use caravel_verif_fw::pwm::PWM_TEST_TIMERS;
use caravel_verif_fw::sram::INDICATOR_FAILED;
use clap::{arg, value_parser};
use std::error::Error;
use std::process::exit;

fn run_sram(model: &mut ModelEmulated, words: u32) -> Result<bool, Box<dyn Error>> {
    model.run_sram_test(words)?;
    let passed = model.mgmt_gpio() == Some(true) && model.indicator_code() != INDICATOR_FAILED;
    println!(
        "sram: mgmt_gpio={:?} indicator=0b{:02b}",
        model.mgmt_gpio(),
        model.indicator_code()
    );
    Ok(passed)
}

fn run_pwm(model: &mut ModelEmulated) -> Result<bool, Box<dyn Error>> {
    model.run_pwm_test()?;

    // Sample a little over one full PWM period
    let mut high_seen = [false; PWM_TEST_TIMERS as usize];
    let mut low_seen = [false; PWM_TEST_TIMERS as usize];
    for _ in 0..250_000 {
        model.step();
        for (k, (high, low)) in high_seen.iter_mut().zip(low_seen.iter_mut()).enumerate() {
            if model.pwm0_out(k) {
                *high = true;
            } else {
                *low = true;
            }
        }
    }

    let mut passed = true;
    for k in 0..PWM_TEST_TIMERS as usize {
        let toggling = high_seen[k] && low_seen[k];
        println!("pwm{}: toggling={}", k, toggling);
        passed &= toggling;
    }
    Ok(passed)
}

fn run_pwm_servo(model: &mut ModelEmulated) -> Result<bool, Box<dyn Error>> {
    model.run_pwm_servo_test()?;
    let events = model.soc().mgmt_gpio.events().to_vec();
    for event in events.iter() {
        println!(
            "pwm-servo: mgmt_gpio={} at cycle {}",
            event.level as u32, event.cycle
        );
    }
    // Setup plus one toggle per schedule step plus the final low
    Ok(events.len() == 7 && model.mgmt_gpio() == Some(false))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = clap::Command::new("caravel-emu")
        .about("Caravel user project emulator")
        .arg(
            arg!(--scenario <NAME> "Verification flow to run: sram, pwm or pwm-servo")
                .required(false)
                .default_value("sram"),
        )
        .arg(
            arg!(--"sram-words" <VALUE> "Words per SRAM macro")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"fault-word" <VALUE> "Corrupt read-back of this word index in SRAM0")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"fault-mask" <VALUE> "XOR mask applied by the injected read fault")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    let sram_words = *args
        .get_one::<u32>("sram-words")
        .unwrap_or(&InitParams::default().sram_words);

    let mut model = ModelEmulated::init(InitParams { sram_words })?;

    if let Some(&word) = args.get_one::<u32>("fault-word") {
        let mask = *args.get_one::<u32>("fault-mask").unwrap_or(&1);
        model.soc().sram[0].inject_read_fault(word, mask);
    }

    let scenario = args.get_one::<String>("scenario").unwrap();
    let passed = match scenario.as_str() {
        "sram" => run_sram(&mut model, sram_words)?,
        "pwm" => run_pwm(&mut model)?,
        "pwm-servo" => run_pwm_servo(&mut model)?,
        _ => {
            println!("Unknown scenario {:?}", scenario);
            exit(2);
        }
    };

    if !passed {
        println!("[failed]");
        exit(1);
    }
    println!("[ok]");
    Ok(())
}
