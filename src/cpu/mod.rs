/*!
cpu - NMOS 6502 instruction execution core.

Layout:

```text
    state.rs       - Architectural registers, flag masks, stack primitives.
    regs.rs        - `CpuRegs` trait: generic register/flag access.
    addressing.rs  - Addressing modes and operand resolution.
    table.rs       - 256-entry opcode table (instruction, mode, cycles, penalty).
    execute.rs     - Instruction semantic helpers (ALU, stack, RMW, branch).
    dispatch/      - Fetch/decode/resolve and per-family handlers.
    interrupts.rs  - RESET/NMI/IRQ latching and entry sequences.
    cycles.rs      - Cycle pricing and the per-tick accountant.
    config.rs      - Runtime options (decimal mode).
    core/          - `Cpu` façade: clock, signals, register access.
```

The public surface is the `Cpu` façade. `CpuState` and the flag masks are
exported for hosts that snapshot or inspect state.

Feature flags:
    trace  - `log::trace!` one record per executed instruction
             (target "cpu::instr").

Usage:
```rust
use nmos6502::bus::Ram;
use nmos6502::cpu::Cpu;
use nmos6502::loader::{Vectors, load_image, set_vectors};

let mut ram = Ram::new();
load_image(&mut ram, 0x8000, &[0xA9, 0x05, 0x69, 0x03]).unwrap();
set_vectors(&mut ram, Vectors::uniform(0x8000)).unwrap();

let mut cpu = Cpu::new();
cpu.reset(&mut ram).unwrap();
cpu.run(&mut ram, 2).unwrap();
assert_eq!(cpu.a(), 0x08);
```
*/

pub mod addressing;
pub mod config;
pub mod core;
pub mod cycles;
pub mod dispatch;
pub mod execute;
pub mod interrupts;
pub mod regs;
pub mod state;
pub mod table;

pub use crate::cpu::config::CpuConfig;
pub use crate::cpu::core::Cpu;
pub use crate::cpu::interrupts::{Phase, Signals};
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
