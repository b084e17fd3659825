//! Core traits for 65xx-family emulation.

mod bus;
mod cpu;
mod system_bus;

pub use bus::Bus;
pub use cpu::Cpu;
pub use system_bus::{ReadHookFn, SystemBus, WriteHookFn};
