//! Tests for the RESET, IRQ, NMI, and BRK sequences.

use emu65_core::{Bus, Cpu, SystemBus};
use mos_65xx::{flags, ExecState, Mos65xx};

fn pc(cpu: &Mos65xx) -> u16 {
    <Mos65xx as Cpu<SystemBus>>::pc(cpu)
}

fn bus_with_vectors(reset: u16, irq: u16, nmi: u16) -> SystemBus {
    let mut bus = SystemBus::new();
    bus.write(0xFFFC, reset as u8);
    bus.write(0xFFFD, (reset >> 8) as u8);
    bus.write(0xFFFE, irq as u8);
    bus.write(0xFFFF, (irq >> 8) as u8);
    bus.write(0xFFFA, nmi as u8);
    bus.write(0xFFFB, (nmi >> 8) as u8);
    bus
}

/// Burn cycles until the next tick would fetch. Returns how many ticks
/// it took.
fn settle(cpu: &mut Mos65xx, bus: &mut SystemBus) -> u32 {
    let mut ticks = 0;
    while !cpu.is_instruction_complete() {
        cpu.tick(bus);
        ticks += 1;
        assert!(ticks < 32, "sequence did not settle");
    }
    ticks
}

fn run_instruction(cpu: &mut Mos65xx, bus: &mut SystemBus) -> u32 {
    cpu.tick(bus);
    1 + settle(cpu, bus)
}

#[test]
fn tick_is_a_noop_before_reset() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    let mut cpu = Mos65xx::new();
    assert_eq!(cpu.state(), ExecState::Stopped);

    cpu.tick(&mut bus);
    assert_eq!(cpu.total_cycles(), 0);
    assert_eq!(cpu.state(), ExecState::Stopped);
}

#[test]
fn reset_loads_vector_and_initializes_registers() {
    let mut bus = bus_with_vectors(0x8123, 0x9000, 0xA000);
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);

    assert_eq!(pc(&cpu), 0x8123);
    assert_eq!(cpu.regs.s, 0xFF);
    assert_eq!(cpu.regs.a, 0);
    assert_eq!(cpu.regs.x, 0);
    assert_eq!(cpu.regs.y, 0);
    assert!(cpu.regs.p.get(flags::I));
    assert!(cpu.regs.p.get(flags::U));

    // The reset sequence charges 8 cycles and writes nothing to the
    // stack.
    let ticks = settle(&mut cpu, &mut bus);
    assert_eq!(ticks, 8);
    assert_eq!(bus.peek(0x01FF), 0x00);
    assert_eq!(bus.peek(0x01FE), 0x00);
}

#[test]
fn irq_is_ignored_while_i_is_set() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);

    // I is set straight out of reset.
    let s = cpu.regs.s;
    cpu.irq(&mut bus);
    assert_eq!(pc(&cpu), 0x8000, "masked IRQ must not vector");
    assert_eq!(cpu.regs.s, s, "masked IRQ must not push");
}

#[test]
fn irq_frames_state_and_vectors() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0x58, 0xEA]); // CLI; NOP
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus); // CLI

    cpu.irq(&mut bus);

    assert_eq!(pc(&cpu), 0x9000);
    assert_eq!(cpu.regs.s, 0xFC, "PC word + status pushed");
    assert!(cpu.regs.p.get(flags::I), "IRQ masks further IRQs");
    assert_eq!(cpu.state(), ExecState::Interrupt);

    // Interrupted PC ($8001) framed high-then-low; status image has
    // B clear, U set.
    assert_eq!(bus.peek(0x01FF), 0x80);
    assert_eq!(bus.peek(0x01FE), 0x01);
    let pushed_p = bus.peek(0x01FD);
    assert_eq!(pushed_p & 0x10, 0x00, "B clear in IRQ frame");
    assert_eq!(pushed_p & 0x20, 0x20, "U set in IRQ frame");

    // The sequence costs 7 cycles on top of the finished instruction.
    assert_eq!(settle(&mut cpu, &mut bus), 7);
}

#[test]
fn nmi_is_never_masked() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);

    assert!(cpu.regs.p.get(flags::I));
    cpu.nmi(&mut bus);

    assert_eq!(pc(&cpu), 0xA000);
    assert_eq!(cpu.regs.s, 0xFC);
    assert_eq!(settle(&mut cpu, &mut bus), 8, "NMI charges 8 cycles");
}

#[test]
fn irq_handler_returns_through_rti() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0x58, 0xEA, 0xEA]); // CLI; NOP; NOP
    bus.load(0x9000, &[0x40]); // RTI
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus); // CLI

    cpu.irq(&mut bus);
    settle(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus); // RTI

    assert_eq!(pc(&cpu), 0x8001, "resumes at the interrupted PC");
    assert_eq!(cpu.regs.s, 0xFF, "stack frame fully popped");
    assert!(!cpu.regs.p.get(flags::I), "restored status had I clear");
}

#[test]
fn brk_pushes_padded_return_address() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0x00, 0xEA, 0xEA]); // BRK; padding; next
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);

    let cycles = run_instruction(&mut cpu, &mut bus);

    assert_eq!(cycles, 7);
    assert_eq!(pc(&cpu), 0x9000, "BRK vectors through $FFFE");
    assert_eq!(cpu.regs.s, 0xFC);
    assert!(cpu.regs.p.get(flags::I));

    // Return address skips the padding byte: $8002.
    assert_eq!(bus.peek(0x01FF), 0x80);
    assert_eq!(bus.peek(0x01FE), 0x02);
    // BRK frames I already set, with B and U in the image.
    let pushed_p = bus.peek(0x01FD);
    assert_eq!(pushed_p & 0x30, 0x30, "B and U set in BRK frame");
    assert_eq!(pushed_p & 0x04, 0x04, "I set before the status push");
}

#[test]
fn brk_rti_round_trip() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0x00, 0xEA, 0xA9, 0x07]); // BRK; pad; LDA #$07
    bus.load(0x9000, &[0x40]); // RTI
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);

    run_instruction(&mut cpu, &mut bus); // BRK
    run_instruction(&mut cpu, &mut bus); // RTI
    assert_eq!(pc(&cpu), 0x8002);
    assert_eq!(cpu.regs.s, 0xFF);

    run_instruction(&mut cpu, &mut bus); // LDA #$07
    assert_eq!(cpu.regs.a, 0x07);
}

#[test]
fn undocumented_opcode_is_a_one_cycle_noop() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0x02, 0xA9, 0x55]); // XXX; LDA #$55
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);

    let regs_before = (cpu.regs.a, cpu.regs.x, cpu.regs.y, cpu.regs.s);
    let cycles = run_instruction(&mut cpu, &mut bus);

    assert_eq!(cycles, 1);
    assert_eq!(cpu.state(), ExecState::IllegalOpcode);
    assert_eq!(
        (cpu.regs.a, cpu.regs.x, cpu.regs.y, cpu.regs.s),
        regs_before,
        "sentinel must not disturb registers"
    );
    assert_eq!(pc(&cpu), 0x8001, "sentinel advances past its byte only");

    // Execution continues normally afterwards.
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x55);
    assert_eq!(cpu.state(), ExecState::Executing);
}

#[test]
fn interrupt_during_instruction_extends_remaining_cycles() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0x58, 0xA9, 0x01]); // CLI; LDA #$01
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus); // CLI

    // Start LDA but leave it mid-flight (1 of 2 cycles done).
    cpu.tick(&mut bus);
    assert!(!cpu.is_instruction_complete());

    cpu.nmi(&mut bus);
    // 1 remaining + 8 for the sequence.
    assert_eq!(settle(&mut cpu, &mut bus), 9);
    assert_eq!(pc(&cpu), 0xA000);
}

#[test]
fn disassembly_snapshot_tracks_current_instruction() {
    let mut bus = bus_with_vectors(0x8000, 0x9000, 0xA000);
    bus.load(0x8000, &[0xA9, 0x42, 0x18]); // LDA #$42; CLC
    let mut cpu = Mos65xx::new();
    cpu.reset(&mut bus);
    settle(&mut cpu, &mut bus);
    assert!(cpu.disassemble_current(&mut bus).is_none(), "no snapshot before the first fetch");

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.disassemble_current(&mut bus).as_deref(), Some("LDA  #42"));

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.disassemble_current(&mut bus).as_deref(), Some("CLC"));
}
