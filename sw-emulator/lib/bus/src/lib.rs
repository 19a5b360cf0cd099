/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Caravel Emulator Bus library.

--*/

mod bus;
mod clock;
mod mem;
mod ram;
mod register;

pub use crate::bus::{Bus, BusError};
pub use crate::clock::{Clock, Timer};
pub use crate::mem::Mem;
pub use crate::ram::Ram;
pub use crate::register::{ReadWriteRegister, Register};
