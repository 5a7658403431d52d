/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW)

Purpose
=======
Centralize side-effect logic for instructions so every dispatch family
shares a single implementation. All helpers are generic over `CpuRegs`
(register/flag access) and, where memory is involved, over `Bus`.

Scope (crate-visible)
---------------------
Flag & status helpers:
    set_flag, get_flag, update_zn
Operand access:
    load_operand, modify (RMW choreography: accumulator or memory target)
Stack helpers:
    push, pop, push_word, pop_word, push_status_with_break
    php, plp, pha, pla
Loads / transfers / logical / inc-dec register:
    lda/ldx/ldy, tax/tay/txa/tya/tsx/txs, and/ora/eor/bit, inx/iny/dex/dey
Shifts / rotates (value transforms, used through `modify`):
    asl, lsr, rol, ror
Arithmetic / compare:
    adc, sbc (binary and BCD), compare
Branch:
    branch

Design Notes
============
- Flag tests are bitwise AND against zero throughout.
- Memory RMW performs read -> write(old) -> write(new), as NMOS parts do.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::{Operand, crosses_page};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, DECIMAL, NEGATIVE, OVERFLOW, STACK_PAGE, ZERO};

// ---------------------------------------------------------------------------
// Flag helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn set_flag<C: CpuRegs>(cpu: &mut C, mask: u8, on: bool) {
    cpu.assign_flag(mask, on);
}

#[inline]
pub(crate) fn get_flag<C: CpuRegs>(cpu: &C, mask: u8) -> bool {
    cpu.is_flag_set(mask)
}

#[inline]
pub(crate) fn update_zn<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.update_zn(v);
}

// ---------------------------------------------------------------------------
// Operand access
// ---------------------------------------------------------------------------

/// Fetch the data byte an instruction operates on.
#[inline]
pub(crate) fn load_operand<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &C,
    bus: &mut B,
    operand: Operand,
) -> Result<u8, BusError> {
    match operand {
        Operand::Accumulator => Ok(cpu.a()),
        Operand::Immediate(v) => Ok(v),
        Operand::Address(addr) => bus.read(addr),
        Operand::Relative(d) => Ok(d as u8),
    }
}

/// Effective address of a memory operand.
///
/// The opcode table pairs every memory instruction with a memory mode, so
/// `None` means a table bug: debug builds panic, release builds let the
/// caller skip the access.
#[inline]
pub(crate) fn address_of(operand: Operand) -> Option<u16> {
    debug_assert!(
        matches!(operand, Operand::Address(_)),
        "memory instruction resolved to {operand:?}"
    );
    match operand {
        Operand::Address(addr) => Some(addr),
        _ => None,
    }
}

/// Read-modify-write an operand.
///
/// Accumulator target: transform A in place, no bus traffic.
/// Memory target: read -> dummy write of the old value -> write of the new.
/// Returns the new value.
pub(crate) fn modify<C, B, F>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    transform: F,
) -> Result<u8, BusError>
where
    C: CpuRegs,
    B: Bus + ?Sized,
    F: FnOnce(&mut C, u8) -> u8,
{
    match operand {
        Operand::Accumulator => {
            let old = cpu.a();
            let new = transform(cpu, old);
            cpu.set_a(new);
            Ok(new)
        }
        other => {
            let Some(addr) = address_of(other) else {
                return load_operand(cpu, bus, other);
            };
            let old = bus.read(addr)?;
            bus.write(addr, old)?;
            let new = transform(cpu, old);
            bus.write(addr, new)?;
            Ok(new)
        }
    }
}

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    v: u8,
) -> Result<(), BusError> {
    let sp = cpu.sp();
    bus.write(STACK_PAGE | sp as u16, v)?;
    cpu.set_sp(sp.wrapping_sub(1));
    Ok(())
}

#[inline]
pub(crate) fn pop<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<u8, BusError> {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.read(STACK_PAGE | sp as u16)
}

#[inline]
pub(crate) fn push_word<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    v: u16,
) -> Result<(), BusError> {
    push(cpu, bus, (v >> 8) as u8)?;
    push(cpu, bus, (v & 0xFF) as u8)
}

#[inline]
pub(crate) fn pop_word<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
) -> Result<u16, BusError> {
    let lo = pop(cpu, bus)? as u16;
    let hi = pop(cpu, bus)? as u16;
    Ok((hi << 8) | lo)
}

/// Read the current stack slot and discard it, S unchanged. Pulls and JSR
/// spend a cycle on this before touching the stack for real.
#[inline]
pub(crate) fn stack_dummy_read<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &C,
    bus: &mut B,
) -> Result<(), BusError> {
    bus.read(STACK_PAGE | cpu.sp() as u16).map(drop)
}

/// Push P with control over Break flag semantics (BRK/PHP vs IRQ/NMI).
pub(crate) fn push_status_with_break<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    set_break: bool,
) -> Result<(), BusError> {
    let v = cpu.compose_status_for_push(set_break);
    push(cpu, bus, v)
}

#[inline]
pub(crate) fn php<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    push_status_with_break(cpu, bus, true)
}

/// Pull P. `set_status` drops BREAK and forces UNUSED.
#[inline]
pub(crate) fn plp<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    let v = pop(cpu, bus)?;
    cpu.set_status(v);
    Ok(())
}

#[inline]
pub(crate) fn pha<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    let a = cpu.a();
    push(cpu, bus, a)
}

#[inline]
pub(crate) fn pla<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    let val = pop(cpu, bus)?;
    cpu.set_a(val);
    update_zn(cpu, val);
    Ok(())
}

// ---------------------------------------------------------------------------
// Loads / Transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn tax<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.a());
}

#[inline]
pub(crate) fn tay<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.a());
}

#[inline]
pub(crate) fn txa<C: CpuRegs>(cpu: &mut C) {
    lda(cpu, cpu.x());
}

#[inline]
pub(crate) fn tya<C: CpuRegs>(cpu: &mut C) {
    lda(cpu, cpu.y());
}

#[inline]
pub(crate) fn tsx<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.sp());
}

/// TXS is the one transfer that leaves P alone.
#[inline]
pub(crate) fn txs<C: CpuRegs>(cpu: &mut C) {
    cpu.set_sp(cpu.x());
}

// ---------------------------------------------------------------------------
// Logical / Bit
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() & v);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() | v);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() ^ v);
}

#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    set_flag(cpu, ZERO, (cpu.a() & v) == 0);
    set_flag(cpu, NEGATIVE, (v & 0x80) != 0);
    set_flag(cpu, OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Increment / Decrement (register)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inx<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.x().wrapping_add(1));
}

#[inline]
pub(crate) fn iny<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.y().wrapping_add(1));
}

#[inline]
pub(crate) fn dex<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.x().wrapping_sub(1));
}

#[inline]
pub(crate) fn dey<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.y().wrapping_sub(1));
}

// ---------------------------------------------------------------------------
// Shifts / Rotates / INC / DEC as value transforms (Z/N set here, C where
// documented). Applied to A or memory through `modify`.
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    set_flag(cpu, CARRY, (v & 0x80) != 0);
    let r = v << 1;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn lsr<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    set_flag(cpu, CARRY, (v & 0x01) != 0);
    let r = v >> 1;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn rol<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = get_flag(cpu, CARRY) as u8;
    set_flag(cpu, CARRY, (v & 0x80) != 0);
    let r = (v << 1) | carry_in;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn ror<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = if get_flag(cpu, CARRY) { 0x80 } else { 0 };
    set_flag(cpu, CARRY, (v & 0x01) != 0);
    let r = (v >> 1) | carry_in;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn inc<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn dec<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    update_zn(cpu, r);
    r
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

/// Add with carry. `decimal_enabled` gates BCD mode (D flag is honoured only
/// when the part has a decimal adjuster).
pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8, decimal_enabled: bool) {
    if decimal_enabled && get_flag(cpu, DECIMAL) {
        adc_decimal(cpu, v);
        return;
    }
    let a = cpu.a();
    let carry_in = get_flag(cpu, CARRY) as u16;
    let sum16 = a as u16 + v as u16 + carry_in;
    let result = sum16 as u8;

    set_flag(cpu, CARRY, (sum16 & 0x100) != 0);
    // Overflow: ( !(A ^ M) & (A ^ R) & 0x80 ) != 0
    set_flag(cpu, OVERFLOW, ((!(a ^ v)) & (a ^ result) & 0x80) != 0);
    lda(cpu, result);
}

/// Subtract with borrow: binary SBC is ADC of the one's complement.
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8, decimal_enabled: bool) {
    if decimal_enabled && get_flag(cpu, DECIMAL) {
        sbc_decimal(cpu, v);
        return;
    }
    adc(cpu, v ^ 0xFF, false);
}

fn adc_decimal<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = get_flag(cpu, CARRY) as u16;

    let mut lo = (a & 0x0F) as u16 + (v & 0x0F) as u16 + carry_in;
    if lo >= 0x0A {
        lo = ((lo + 0x06) & 0x0F) + 0x10;
    }
    let mut sum = (a & 0xF0) as u16 + (v & 0xF0) as u16 + lo;
    // V reflects the sum before the high digit is adjusted.
    let intermediate = sum as u8;
    set_flag(cpu, OVERFLOW, ((!(a ^ v)) & (a ^ intermediate) & 0x80) != 0);
    if sum >= 0xA0 {
        sum += 0x60;
    }
    set_flag(cpu, CARRY, sum >= 0x100);
    lda(cpu, sum as u8);
}

fn sbc_decimal<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = get_flag(cpu, CARRY) as i16;

    // C and V come from the binary subtraction.
    let binary = a as i16 - v as i16 - (1 - carry_in);
    let binary_result = binary as u8;
    set_flag(cpu, CARRY, binary >= 0);
    set_flag(cpu, OVERFLOW, ((a ^ v) & (a ^ binary_result) & 0x80) != 0);

    let mut lo = (a & 0x0F) as i16 - (v & 0x0F) as i16 + carry_in - 1;
    if lo < 0 {
        lo = ((lo - 0x06) & 0x0F) - 0x10;
    }
    let mut diff = (a & 0xF0) as i16 - (v & 0xF0) as i16 + lo;
    if diff < 0 {
        diff -= 0x60;
    }
    cpu.set_a(diff as u8);
    update_zn(cpu, diff as u8);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// CMP / CPX / CPY: flags from `reg - v`, register untouched.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    set_flag(cpu, CARRY, reg >= v);
    update_zn(cpu, reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// Outcome of a conditional branch, for cycle accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BranchOutcome {
    pub taken: bool,
    pub page_crossed: bool,
}

/// Apply `offset` to PC (already past the displacement byte) when `take`.
pub(crate) fn branch<C: CpuRegs>(cpu: &mut C, offset: i8, take: bool) -> BranchOutcome {
    if !take {
        return BranchOutcome::default();
    }
    let old_pc = cpu.pc();
    let new_pc = old_pc.wrapping_add(offset as i16 as u16);
    cpu.set_pc(new_pc);
    BranchOutcome {
        taken: true,
        page_crossed: crosses_page(old_pc, new_pc),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;
    use crate::cpu::state::CpuState;

    fn cpu_with(a: u8, carry: bool, decimal: bool) -> CpuState {
        let mut cpu = CpuState::new();
        cpu.set_status(0);
        cpu.set_a(a);
        cpu.assign_flag(CARRY, carry);
        cpu.assign_flag(DECIMAL, decimal);
        cpu
    }

    #[test]
    fn adc_overflow_and_carry() {
        let mut cpu = cpu_with(0x50, false, false);
        adc(&mut cpu, 0x50, true); // 0x50 + 0x50 = 0xA0 (signed overflow)
        assert!(get_flag(&cpu, OVERFLOW));
        assert!(!get_flag(&cpu, CARRY));
        assert!(get_flag(&cpu, NEGATIVE));
        cpu.set_a(0xF0);
        adc(&mut cpu, 0x20, true); // 0xF0 + 0x20 = 0x110
        assert!(get_flag(&cpu, CARRY));
        assert_eq!(cpu.a(), 0x10);
    }

    #[test]
    fn adc_binary_matches_reference_for_all_inputs() {
        for a in 0..=0xFFu16 {
            for m in 0..=0xFFu16 {
                for c in 0..=1u16 {
                    let mut cpu = cpu_with(a as u8, c == 1, false);
                    adc(&mut cpu, m as u8, true);
                    let sum = a + m + c;
                    let r = (sum & 0xFF) as u8;
                    let signed = (a as u8 as i8 as i16) + (m as u8 as i8 as i16) + c as i16;
                    assert_eq!(cpu.a(), r);
                    assert_eq!(get_flag(&cpu, CARRY), sum > 0xFF);
                    assert_eq!(get_flag(&cpu, ZERO), r == 0);
                    assert_eq!(get_flag(&cpu, NEGATIVE), r & 0x80 != 0);
                    assert_eq!(get_flag(&cpu, OVERFLOW), !(-128..=127).contains(&signed));
                }
            }
        }
    }

    #[test]
    fn sbc_binary_matches_reference_for_all_inputs() {
        for a in 0..=0xFFi16 {
            for m in 0..=0xFFi16 {
                for c in 0..=1i16 {
                    let mut cpu = cpu_with(a as u8, c == 1, false);
                    sbc(&mut cpu, m as u8, true);
                    let diff = a - m - (1 - c);
                    let r = diff as u8;
                    let signed = (a as u8 as i8 as i16) - (m as u8 as i8 as i16) - (1 - c);
                    assert_eq!(cpu.a(), r);
                    assert_eq!(get_flag(&cpu, CARRY), diff >= 0);
                    assert_eq!(get_flag(&cpu, ZERO), r == 0);
                    assert_eq!(get_flag(&cpu, NEGATIVE), r & 0x80 != 0);
                    assert_eq!(get_flag(&cpu, OVERFLOW), !(-128..=127).contains(&signed));
                }
            }
        }
    }

    #[test]
    fn sbc_undoes_adc() {
        for a in 0..=0xFFu8 {
            for m in 0..=0xFFu8 {
                let mut cpu = cpu_with(a, false, false);
                adc(&mut cpu, m, true);
                set_flag(&mut cpu, CARRY, true);
                sbc(&mut cpu, m, true);
                assert_eq!(cpu.a(), a, "A={a:02X} M={m:02X}");
            }
        }
    }

    fn bcd(n: u16) -> u8 {
        (((n / 10) << 4) | (n % 10)) as u8
    }

    #[test]
    fn adc_decimal_matches_bcd_reference() {
        for a in 0..100u16 {
            for m in 0..100u16 {
                for c in 0..=1u16 {
                    let mut cpu = cpu_with(bcd(a), c == 1, true);
                    adc(&mut cpu, bcd(m), true);
                    let sum = a + m + c;
                    let r = bcd(sum % 100);
                    assert_eq!(cpu.a(), r, "{a} + {m} + {c}");
                    assert_eq!(get_flag(&cpu, CARRY), sum > 99);
                    assert_eq!(get_flag(&cpu, ZERO), r == 0);
                    assert_eq!(get_flag(&cpu, NEGATIVE), r & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn sbc_decimal_matches_bcd_reference() {
        for a in 0..100i16 {
            for m in 0..100i16 {
                for c in 0..=1i16 {
                    let mut cpu = cpu_with(bcd(a as u16), c == 1, true);
                    sbc(&mut cpu, bcd(m as u16), true);
                    let diff = a - m - (1 - c);
                    let r = bcd(diff.rem_euclid(100) as u16);
                    assert_eq!(cpu.a(), r, "{a} - {m} - borrow {}", 1 - c);
                    assert_eq!(get_flag(&cpu, CARRY), diff >= 0);
                    assert_eq!(get_flag(&cpu, ZERO), r == 0);
                    assert_eq!(get_flag(&cpu, NEGATIVE), r & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn decimal_examples() {
        let mut cpu = cpu_with(0x58, true, true);
        adc(&mut cpu, 0x46, true);
        assert_eq!(cpu.a(), 0x05);
        assert!(get_flag(&cpu, CARRY));

        let mut cpu = cpu_with(0x40, true, true);
        sbc(&mut cpu, 0x13, true);
        assert_eq!(cpu.a(), 0x27);
        assert!(get_flag(&cpu, CARRY));
    }

    #[test]
    fn decimal_flag_ignored_when_disabled() {
        let mut cpu = cpu_with(0x09, false, true);
        adc(&mut cpu, 0x01, false);
        assert_eq!(cpu.a(), 0x0A);
    }

    #[test]
    fn compare_sets_flags_without_writeback() {
        let mut cpu = cpu_with(0x40, false, false);
        compare(&mut cpu, 0x40, 0x40);
        assert!(get_flag(&cpu, CARRY) && get_flag(&cpu, ZERO));
        compare(&mut cpu, 0x40, 0x41);
        assert!(!get_flag(&cpu, CARRY));
        assert!(get_flag(&cpu, NEGATIVE));
        assert!(!get_flag(&cpu, ZERO));
        compare(&mut cpu, 0x00, 0x80);
        assert!(!get_flag(&cpu, CARRY));
        assert!(get_flag(&cpu, NEGATIVE));
        assert_eq!(cpu.a(), 0x40);
    }

    #[test]
    fn bit_copies_memory_bits() {
        let mut cpu = cpu_with(0x01, false, false);
        bit(&mut cpu, 0xC0);
        assert!(get_flag(&cpu, ZERO));
        assert!(get_flag(&cpu, NEGATIVE));
        assert!(get_flag(&cpu, OVERFLOW));
        assert_eq!(cpu.a(), 0x01);
    }

    #[test]
    fn rotates_move_carry_through() {
        let mut cpu = cpu_with(0, true, false);
        assert_eq!(rol(&mut cpu, 0x80), 0x01);
        assert!(get_flag(&cpu, CARRY));
        assert_eq!(ror(&mut cpu, 0x01), 0x80);
        assert!(get_flag(&cpu, CARRY));
        assert!(get_flag(&cpu, NEGATIVE));
        assert_eq!(lsr(&mut cpu, 0x01), 0x00);
        assert!(get_flag(&cpu, ZERO));
        assert!(get_flag(&cpu, CARRY));
        assert_eq!(asl(&mut cpu, 0x40), 0x80);
        assert!(!get_flag(&cpu, CARRY));
    }

    #[test]
    fn modify_memory_writes_old_then_new() {
        let mut cpu = cpu_with(0x77, false, false);
        let mut bus = Ram::new();
        bus.poke(0x0200, 0x0F);
        let r = modify(&mut cpu, &mut bus, Operand::Address(0x0200), inc).unwrap();
        assert_eq!(r, 0x10);
        assert_eq!(bus.peek(0x0200), 0x10);
        assert_eq!(cpu.a(), 0x77);
    }

    #[test]
    fn address_of_memory_operand() {
        assert_eq!(address_of(Operand::Address(0x1234)), Some(0x1234));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "memory instruction resolved to Immediate(1)")]
    fn address_of_rejects_non_memory_operand_in_debug() {
        let _ = address_of(Operand::Immediate(1));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn non_memory_operand_skips_the_access_in_release() {
        let mut cpu = CpuState::new();
        let mut bus = Ram::new();
        assert_eq!(address_of(Operand::Relative(-2)), None);
        assert_eq!(modify(&mut cpu, &mut bus, Operand::Immediate(0x41), inc).unwrap(), 0x41);
        assert!(bus.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn modify_accumulator_leaves_memory_alone() {
        let mut cpu = cpu_with(0x81, false, false);
        let mut bus = Ram::new();
        let r = modify(&mut cpu, &mut bus, Operand::Accumulator, asl).unwrap();
        assert_eq!(r, 0x02);
        assert_eq!(cpu.a(), 0x02);
        assert!(get_flag(&cpu, CARRY));
        assert!(bus.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn branch_page_cross() {
        let mut cpu = CpuState::new();
        cpu.set_pc(0x80FF);
        let out = branch(&mut cpu, 2, true);
        assert_eq!(out, BranchOutcome { taken: true, page_crossed: true });
        assert_eq!(cpu.pc(), 0x8101);

        cpu.set_pc(0x8010);
        let out = branch(&mut cpu, -0x10, true);
        assert_eq!(out, BranchOutcome { taken: true, page_crossed: false });
        assert_eq!(cpu.pc(), 0x8000);

        let out = branch(&mut cpu, -1, false);
        assert_eq!(out, BranchOutcome::default());
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn stack_pointer_wraps_within_page() {
        let mut bus = Ram::new();
        let mut cpu = CpuState::new();
        cpu.set_sp(0x00);
        push(&mut cpu, &mut bus, 0x11).unwrap();
        assert_eq!(bus.peek(0x0100), 0x11);
        assert_eq!(cpu.sp(), 0xFF);
        push(&mut cpu, &mut bus, 0x22).unwrap();
        assert_eq!(bus.peek(0x01FF), 0x22);
        assert_eq!(pop(&mut cpu, &mut bus).unwrap(), 0x22);
        assert_eq!(pop(&mut cpu, &mut bus).unwrap(), 0x11);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn word_push_is_high_then_low() {
        let mut bus = Ram::new();
        let mut cpu = CpuState::new();
        cpu.set_sp(0xFF);
        push_word(&mut cpu, &mut bus, 0x1234).unwrap();
        assert_eq!(bus.peek(0x01FF), 0x12);
        assert_eq!(bus.peek(0x01FE), 0x34);
        assert_eq!(pop_word(&mut cpu, &mut bus).unwrap(), 0x1234);
    }

    #[test]
    fn plp_drops_break_and_keeps_unused() {
        let mut cpu = CpuState::new();
        cpu.set_sp(0xFF);
        let mut bus = Ram::new();
        push(&mut cpu, &mut bus, 0xFF).unwrap();
        plp(&mut cpu, &mut bus).unwrap();
        assert_eq!(CpuRegs::status(&cpu), 0xEF);
    }
}
