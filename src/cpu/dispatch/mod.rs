/*!
dispatch - Fetch / decode / resolve / execute for one instruction

Overview
========
`execute_instruction` runs one instruction to completion against the bus:
1. Fetch the opcode byte at PC, advance PC.
2. Decode through the static `OPCODES` table (total over 256 bytes).
3. Resolve the addressing mode into an `Operand` (+ page-cross fact).
   JSR skips this step; it fetches its target around the return pushes.
4. Issue the indexed fix-up read: always for stores and read-modify-write,
   only on a page cross for plain reads.
5. Route the `Instruction` to its family handler via an exhaustive match.
6. Price the instruction: base cycles + dynamic penalties.

Every bus access, dummy ones included, happens in the order and number the
NMOS part performs it.

Interrupt sampling and cycle pacing belong to the `Cpu` façade; this module
only ever sees instruction boundaries.

Families
========
  arithmetic    ADC SBC
  branches      BPL BMI BVC BVS BCC BCS BNE BEQ
  compare       CMP CPX CPY
  control_flow  JMP JSR RTS RTI BRK
  load_store    LDA LDX LDY STA STX STY
  logical       AND ORA EOR BIT
  misc          transfers, stack, flags, INX/INY/DEX/DEY, NOP
  rmw           ASL LSR ROL ROR INC DEC
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

#[cfg(feature = "trace")]
use log::trace;
use log::warn;

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::{Operand, Resolved, fetch_byte, resolve};
use crate::cpu::config::CpuConfig;
use crate::cpu::cycles::{Extra, instruction_cycles};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::{Instruction, Penalty, decode};

use branches::Condition;
use compare::Reg;
use logical::Logic;
use misc::{Stack, Step, Transfer};
use rmw::Rmw;

/// Execute the instruction at PC. Returns its total cycle cost.
pub(crate) fn execute_instruction<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    config: &CpuConfig,
) -> Result<u32, BusError> {
    let pc = cpu.pc();
    let opcode = fetch_byte(cpu, bus)?;
    let entry = decode(opcode);

    #[cfg(feature = "trace")]
    trace!(
        target: "cpu::instr",
        "{pc:04X}  {opcode:02X}  {:<3} {:<4} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        entry.instruction,
        entry.mode,
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.status(),
        cpu.sp()
    );

    if !entry.official {
        warn!("unofficial opcode ${opcode:02X} at ${pc:04X} executed as NOP");
    }

    let resolved = match entry.instruction {
        Instruction::Jsr => Resolved::plain(Operand::Accumulator),
        _ => resolve(entry.mode, cpu, bus)?,
    };
    if let Some(unfixed) = resolved.unfixed {
        if resolved.page_crossed || entry.penalty != Penalty::PageCross {
            bus.read(unfixed)?;
        }
    }
    let operand = resolved.operand;
    let mut extra = Extra {
        page_crossed: resolved.page_crossed,
        ..Extra::default()
    };

    use Instruction::*;
    match entry.instruction {
        // Loads / stores
        Lda => load_store::op_lda(cpu, bus, operand)?,
        Ldx => load_store::op_ldx(cpu, bus, operand)?,
        Ldy => load_store::op_ldy(cpu, bus, operand)?,
        Sta => load_store::op_sta(cpu, bus, operand)?,
        Stx => load_store::op_stx(cpu, bus, operand)?,
        Sty => load_store::op_sty(cpu, bus, operand)?,

        // Arithmetic
        Adc => arithmetic::op_adc(cpu, bus, operand, config.decimal_mode)?,
        Sbc => arithmetic::op_sbc(cpu, bus, operand, config.decimal_mode)?,

        // Logical
        And => logical::op_logic(cpu, bus, operand, Logic::And)?,
        Ora => logical::op_logic(cpu, bus, operand, Logic::Ora)?,
        Eor => logical::op_logic(cpu, bus, operand, Logic::Eor)?,
        Bit => logical::op_bit(cpu, bus, operand)?,

        // Compare
        Cmp => compare::op_compare(cpu, bus, operand, Reg::A)?,
        Cpx => compare::op_compare(cpu, bus, operand, Reg::X)?,
        Cpy => compare::op_compare(cpu, bus, operand, Reg::Y)?,

        // Read-modify-write
        Asl => rmw::op_rmw(cpu, bus, operand, Rmw::Asl)?,
        Lsr => rmw::op_rmw(cpu, bus, operand, Rmw::Lsr)?,
        Rol => rmw::op_rmw(cpu, bus, operand, Rmw::Rol)?,
        Ror => rmw::op_rmw(cpu, bus, operand, Rmw::Ror)?,
        Inc => rmw::op_rmw(cpu, bus, operand, Rmw::Inc)?,
        Dec => rmw::op_rmw(cpu, bus, operand, Rmw::Dec)?,

        // Branches
        Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq => {
            let cond = match entry.instruction {
                Bpl => Condition { flag: NEGATIVE, expected: false },
                Bmi => Condition { flag: NEGATIVE, expected: true },
                Bvc => Condition { flag: OVERFLOW, expected: false },
                Bvs => Condition { flag: OVERFLOW, expected: true },
                Bcc => Condition { flag: CARRY, expected: false },
                Bcs => Condition { flag: CARRY, expected: true },
                Bne => Condition { flag: ZERO, expected: false },
                _ => Condition { flag: ZERO, expected: true },
            };
            let outcome = branches::op_branch(cpu, bus, operand, cond)?;
            extra.branch_taken = outcome.taken;
            extra.branch_page_crossed = outcome.page_crossed;
        }

        // Control flow
        Jmp => control_flow::op_jmp(cpu, operand),
        Jsr => control_flow::op_jsr(cpu, bus)?,
        Rts => control_flow::op_rts(cpu, bus)?,
        Rti => control_flow::op_rti(cpu, bus)?,
        Brk => control_flow::op_brk(cpu, bus)?,

        // Transfers
        Tax => misc::op_transfer(cpu, Transfer::Tax),
        Tay => misc::op_transfer(cpu, Transfer::Tay),
        Txa => misc::op_transfer(cpu, Transfer::Txa),
        Tya => misc::op_transfer(cpu, Transfer::Tya),
        Tsx => misc::op_transfer(cpu, Transfer::Tsx),
        Txs => misc::op_transfer(cpu, Transfer::Txs),

        // Stack
        Pha => misc::op_stack(cpu, bus, Stack::Pha)?,
        Php => misc::op_stack(cpu, bus, Stack::Php)?,
        Pla => misc::op_stack(cpu, bus, Stack::Pla)?,
        Plp => misc::op_stack(cpu, bus, Stack::Plp)?,

        // Flags
        Clc => misc::op_flag(cpu, CARRY, false),
        Sec => misc::op_flag(cpu, CARRY, true),
        Cli => misc::op_flag(cpu, IRQ_DISABLE, false),
        Sei => misc::op_flag(cpu, IRQ_DISABLE, true),
        Clv => misc::op_flag(cpu, OVERFLOW, false),
        Cld => misc::op_flag(cpu, DECIMAL, false),
        Sed => misc::op_flag(cpu, DECIMAL, true),

        // Register inc/dec
        Inx => misc::op_step(cpu, Step::Inx),
        Iny => misc::op_step(cpu, Step::Iny),
        Dex => misc::op_step(cpu, Step::Dex),
        Dey => misc::op_step(cpu, Step::Dey),

        Nop => {}
    }

    Ok(instruction_cycles(&entry, extra))
}
