/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Caravel Emulator Peripheral library.

--*/

mod gpio;
mod housekeeping;
mod mgmt_gpio;
mod root_bus;
mod sram;
mod tmr32;

pub use crate::gpio::{GpioPads, PadConfig};
pub use crate::housekeeping::Housekeeping;
pub use crate::mgmt_gpio::{MgmtGpio, MgmtGpioEvent};
pub use crate::root_bus::{UserSocBus, UserSocBusArgs};
pub use crate::sram::SramMacro;
pub use crate::tmr32::Tmr32;
