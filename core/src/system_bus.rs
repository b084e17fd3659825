//! Flat 64 KiB memory with range-keyed read/write hooks.
//!
//! `SystemBus` is the standard memory system for 65xx machines: a full
//! backing array plus ordered lists of device hooks. A hook claims an
//! inclusive address range; on dispatch the first registered hook whose
//! range contains the address wins, so hosts layer devices simply by
//! registration order. Ranges may overlap.

use crate::Bus;

/// Read hook: supplies the byte for addresses inside its range.
pub type ReadHookFn = Box<dyn FnMut(u16) -> u8 + Send>;

/// Write hook: observes stores to addresses inside its range.
pub type WriteHookFn = Box<dyn FnMut(u16, u8) + Send>;

struct ReadHook {
    start: u16,
    end: u16,
    hook: ReadHookFn,
}

struct WriteHook {
    start: u16,
    end: u16,
    hook: WriteHookFn,
}

/// The standard 65xx memory system: 64 KiB of RAM plus device hooks.
///
/// Hooks are `Send` so a host driving the machine from another thread
/// can keep CPU and bus behind a single lock.
pub struct SystemBus {
    ram: Box<[u8; 0x10000]>,
    read_hooks: Vec<ReadHook>,
    write_hooks: Vec<WriteHook>,
}

impl SystemBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x10000]),
            read_hooks: Vec::new(),
            write_hooks: Vec::new(),
        }
    }

    /// Copy `data` into the backing RAM starting at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if the data does not fit below the top of memory.
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let start = addr as usize;
        self.ram[start..start + data.len()].copy_from_slice(data);
    }

    /// Read the backing byte without dispatching to hooks.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    /// Register a read hook over the inclusive range `start..=end`.
    ///
    /// The first registered hook containing an address wins.
    pub fn register_read_hook<F>(&mut self, start: u16, end: u16, hook: F)
    where
        F: FnMut(u16) -> u8 + Send + 'static,
    {
        self.read_hooks.push(ReadHook {
            start,
            end,
            hook: Box::new(hook),
        });
    }

    /// Register a write hook over the inclusive range `start..=end`.
    ///
    /// A store dispatches to at most one hook, after the backing byte
    /// has been updated.
    pub fn register_write_hook<F>(&mut self, start: u16, end: u16, hook: F)
    where
        F: FnMut(u16, u8) + Send + 'static,
    {
        self.write_hooks.push(WriteHook {
            start,
            end,
            hook: Box::new(hook),
        });
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        let hit = self
            .read_hooks
            .iter_mut()
            .find(|entry| entry.start <= addr && addr <= entry.end);
        match hit {
            Some(entry) => (entry.hook)(addr),
            None => self.ram[addr as usize],
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        // Backing store first: the hook observes the post-write image.
        self.ram[addr as usize] = value;
        let hit = self
            .write_hooks
            .iter_mut()
            .find(|entry| entry.start <= addr && addr <= entry.end);
        if let Some(entry) = hit {
            (entry.hook)(addr, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn last_write_wins() {
        let mut bus = SystemBus::new();
        bus.write(0x1234, 0x11);
        bus.write(0x1234, 0x22);
        bus.write(0x1234, 0x33);
        assert_eq!(bus.read(0x1234), 0x33);
        assert_eq!(bus.peek(0x1234), 0x33);
    }

    #[test]
    fn read_hook_supplies_value_inside_range_only() {
        let mut bus = SystemBus::new();
        bus.load(0x2000, &[0xAA, 0xBB, 0xCC]);
        bus.register_read_hook(0x2001, 0x2001, |_| 0x5E);

        assert_eq!(bus.read(0x2000), 0xAA);
        assert_eq!(bus.read(0x2001), 0x5E);
        assert_eq!(bus.read(0x2002), 0xCC);
        // The backing byte is untouched by the hook.
        assert_eq!(bus.peek(0x2001), 0xBB);
    }

    #[test]
    fn first_registered_read_hook_wins_on_overlap() {
        let mut bus = SystemBus::new();
        bus.register_read_hook(0x4000, 0x4FFF, |_| 0x01);
        bus.register_read_hook(0x4000, 0x40FF, |_| 0x02);

        assert_eq!(bus.read(0x4080), 0x01);
    }

    #[test]
    fn range_ends_are_inclusive() {
        let mut bus = SystemBus::new();
        bus.register_read_hook(0x8000, 0x8001, |_| 0x7F);

        assert_eq!(bus.read(0x8000), 0x7F);
        assert_eq!(bus.read(0x8001), 0x7F);
        assert_eq!(bus.read(0x8002), 0x00);
        assert_eq!(bus.read(0x7FFF), 0x00);
    }

    #[test]
    fn write_hook_sees_post_write_image() {
        let (tx, rx) = mpsc::channel();
        let mut bus = SystemBus::new();
        bus.register_write_hook(0xD000, 0xD3FF, move |addr, value| {
            tx.send((addr, value)).unwrap();
        });

        bus.write(0xD020, 0x0E);
        assert_eq!(bus.peek(0xD020), 0x0E);
        assert_eq!(rx.try_recv().unwrap(), (0xD020, 0x0E));
    }

    #[test]
    fn write_dispatches_to_at_most_one_hook() {
        let (tx, rx) = mpsc::channel();
        let tx2 = tx.clone();
        let mut bus = SystemBus::new();
        bus.register_write_hook(0xD000, 0xDFFF, move |addr, _| tx.send((1u8, addr)).unwrap());
        bus.register_write_hook(0xD000, 0xD0FF, move |addr, _| tx2.send((2u8, addr)).unwrap());

        bus.write(0xD010, 0xFF);
        assert_eq!(rx.try_recv().unwrap(), (1, 0xD010));
        assert!(rx.try_recv().is_err(), "second hook must not fire");
    }

    #[test]
    fn write_outside_any_hook_still_lands_in_ram() {
        let mut bus = SystemBus::new();
        bus.register_write_hook(0xD000, 0xDFFF, |_, _| {});
        bus.write(0x0300, 0x42);
        assert_eq!(bus.read(0x0300), 0x42);
    }
}
