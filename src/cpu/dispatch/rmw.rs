/*!
rmw.rs - ASL / LSR / ROL / ROR / INC / DEC

Overview
========
Read-modify-write family. The resolved operand picks the target:

  Operand::Accumulator  -> transform A (ASL A, LSR A, ROL A, ROR A)
  Operand::Address(ea)  -> read ea, write old value back, write new value

The doubled write is the NMOS behaviour hosts with write-sensitive
registers rely on. Base cycles in the table already include the extra
bus cycle, and indexed forms never pay a page-cross penalty.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl, dec, inc, lsr, modify, rol, ror};
use crate::cpu::regs::CpuRegs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Rmw {
    Asl,
    Lsr,
    Rol,
    Ror,
    Inc,
    Dec,
}

pub(super) fn op_rmw<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    kind: Rmw,
) -> Result<(), BusError> {
    match kind {
        Rmw::Asl => modify(cpu, bus, operand, asl)?,
        Rmw::Lsr => modify(cpu, bus, operand, lsr)?,
        Rmw::Rol => modify(cpu, bus, operand, rol)?,
        Rmw::Ror => modify(cpu, bus, operand, ror)?,
        Rmw::Inc => modify(cpu, bus, operand, inc)?,
        Rmw::Dec => modify(cpu, bus, operand, dec)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, NEGATIVE, ZERO};
    use crate::test_utils::{Access, recording_setup, setup};

    #[test]
    fn asl_accumulator() {
        // LDA #$81 ; ASL A
        let (mut cpu, mut bus) = setup(&[0xA9, 0x81, 0x0A]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert_eq!(cpu.a(), 0x02);
        assert!(cpu.get_flag(CARRY));
    }

    #[test]
    fn ror_accumulator_uses_carry_in() {
        // SEC ; LDA #$02 ; ROR A
        let (mut cpu, mut bus) = setup(&[0x38, 0xA9, 0x02, 0x6A]);
        cpu.run(&mut bus, 3).unwrap();
        assert_eq!(cpu.a(), 0x81);
        assert!(!cpu.get_flag(CARRY));
        assert!(cpu.get_flag(NEGATIVE));
    }

    #[test]
    fn inc_zero_page_wraps_to_zero() {
        // INC $10
        let (mut cpu, mut bus) = setup(&[0xE6, 0x10]);
        bus.poke(0x10, 0xFF);
        assert_eq!(cpu.step(&mut bus).unwrap(), 5);
        assert_eq!(bus.peek(0x10), 0x00);
        assert!(cpu.get_flag(ZERO));
    }

    #[test]
    fn dec_absolute_x_costs_seven_even_without_cross() {
        // LDX #$01 ; DEC $1000,X
        let (mut cpu, mut bus) = setup(&[0xA2, 0x01, 0xDE, 0x00, 0x10]);
        bus.poke(0x1001, 0x00);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 7);
        assert_eq!(bus.peek(0x1001), 0xFF);
        assert!(cpu.get_flag(NEGATIVE));
    }

    #[test]
    fn lsr_memory_leaves_accumulator() {
        // LDA #$55 ; LSR $20
        let (mut cpu, mut bus) = setup(&[0xA9, 0x55, 0x46, 0x20]);
        bus.poke(0x20, 0x03);
        cpu.run(&mut bus, 2).unwrap();
        assert_eq!(bus.peek(0x20), 0x01);
        assert_eq!(cpu.a(), 0x55);
        assert!(cpu.get_flag(CARRY));
    }

    #[test]
    fn memory_rmw_writes_old_value_before_new() {
        // ASL $0200
        let (mut cpu, mut bus) = recording_setup(&[0x0E, 0x00, 0x02]);
        bus.ram.poke(0x0200, 0x41);
        bus.accesses.clear();
        cpu.step(&mut bus).unwrap();
        let data: Vec<Access> = bus
            .accesses
            .iter()
            .copied()
            .filter(|a| a.addr() == 0x0200)
            .collect();
        assert_eq!(
            data,
            vec![
                Access::Read(0x0200, 0x41),
                Access::Write(0x0200, 0x41),
                Access::Write(0x0200, 0x82),
            ]
        );
    }

    #[test]
    fn indexed_rmw_reads_unfixed_address_first() {
        use Access::{Read, Write};
        // LDX #$01 ; INC $02FF,X
        let (mut cpu, mut bus) = recording_setup(&[0xA2, 0x01, 0xFE, 0xFF, 0x02]);
        bus.ram.poke(0x0300, 0x7F);
        cpu.step(&mut bus).unwrap();
        bus.accesses.clear();
        assert_eq!(cpu.step(&mut bus).unwrap(), 7);
        assert_eq!(
            bus.accesses,
            vec![
                Read(0x8002, 0xFE),
                Read(0x8003, 0xFF),
                Read(0x8004, 0x02),
                Read(0x0200, 0x00),
                Read(0x0300, 0x7F),
                Write(0x0300, 0x7F),
                Write(0x0300, 0x80),
            ]
        );
    }
}
