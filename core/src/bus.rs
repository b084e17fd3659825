/// A bus that supports memory read/write operations.
///
/// This is the base trait for all 65xx systems, which are fully
/// memory-mapped: devices, RAM, and ROM all live in one flat 16-bit
/// address space.
///
/// Reads are `&mut self` because memory-mapped devices commonly have
/// read side effects (status registers that clear on read, FIFO pops).
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, addr: u16, value: u8);
}
