/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Caravel user project verification
    firmware. Each flow configures the pads, drives the user project
    peripherals over the management bus, and reports progress and
    pass/fail on the management GPIO and indicator pads. Every routine
    is generic over the bus so it runs unchanged against the
    software-emulated SoC.

--*/

pub mod gpio;
pub mod hk;
pub mod march;
pub mod memmap;
pub mod pwm;
pub mod sram;

pub use crate::march::{pattern, MarchResult, MarchTest};
pub use crate::sram::sram_test;
