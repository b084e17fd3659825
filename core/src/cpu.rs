use crate::Bus;

/// A CPU that executes one emulated cycle per call.
///
/// The type parameter `B` is the bus type this CPU operates on. The
/// host owns scheduling: it calls `tick` at whatever rate it maps to
/// wall time, and raises interrupt lines by calling `irq`/`nmi`
/// directly. All four entry points must be serialized by the caller.
pub trait Cpu<B: Bus> {
    /// Advance the CPU by one cycle.
    fn tick(&mut self, bus: &mut B);

    /// Run the reset sequence: reinitialize registers and load PC from
    /// the reset vector at $FFFC-$FFFD.
    fn reset(&mut self, bus: &mut B);

    /// Signal a maskable interrupt. Ignored while the I flag is set.
    fn irq(&mut self, bus: &mut B);

    /// Signal a non-maskable interrupt. Never ignored.
    fn nmi(&mut self, bus: &mut B);

    /// Get the current program counter.
    fn pc(&self) -> u16;
}
