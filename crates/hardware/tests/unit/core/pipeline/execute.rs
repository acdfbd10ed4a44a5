//! Execute Stage Tests.
//!
//! Covers the fixed branch outcome table (one delay-slot bubble per taken
//! branch) and the load/store interlock distance.

use rstest::rstest;

use rspsim_core::isa::encode::Operands;
use rspsim_core::isa::opcode::Opcode;

use crate::common::builder::WindowBuilder;
use crate::common::harness::{pipeline, run_to_break};

// ══════════════════════════════════════════════════════════
// 1. Branch outcome table
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Opcode::Beq, Operands::branch(0, 0, 4), true)]
#[case(Opcode::Bne, Operands::branch(0, 0, 4), false)]
#[case(Opcode::Blez, Operands::branch(0, 0, 4), true)]
#[case(Opcode::Bgtz, Operands::branch(0, 0, 4), false)]
#[case(Opcode::Bltz, Operands::branch(0, 0, 4), false)]
#[case(Opcode::Bgez, Operands::branch(0, 0, 4), true)]
#[case(Opcode::Bltzal, Operands::branch(0, 0, 4), false)]
#[case(Opcode::Bgezal, Operands::branch(0, 0, 4), true)]
#[case(Opcode::J, Operands::jump(8), true)]
#[case(Opcode::Jal, Operands::jump(8), true)]
#[case(Opcode::Jr, Operands::jump_reg(0, 0), true)]
#[case(Opcode::Jalr, Operands::jump_reg(0, 0), true)]
fn taken_branches_cost_one_bubble(
    #[case] op: Opcode,
    #[case] operands: Operands,
    #[case] taken: bool,
) {
    let words = WindowBuilder::new().op(op, operands).nop().nop().brk().build();
    let p = run_to_break(&words);

    assert_eq!(p.stats.delay_slot_bubbles, u64::from(taken), "{op}");
    assert_eq!(p.stats.cycles, 8 + u64::from(taken), "{op}");
    assert!(!p.delay_slot, "{op}");
}

#[test]
fn delay_slot_flag_tracks_the_branch() {
    let words = WindowBuilder::new()
        .op(Opcode::Beq, Operands::branch(0, 0, 4))
        .nop()
        .nop()
        .brk()
        .build();
    let mut p = pipeline(&words);

    p.step();
    p.step();
    assert!(!p.delay_slot);

    // Step 3: the branch executes.
    p.step();
    assert!(p.delay_slot);
    assert!(p.rd_in.su.bubble && p.rd_in.vu.bubble);
    assert_eq!(p.fetch.pc, 8);

    // Step 4: the delay-slot instruction executes and clears it.
    p.step();
    assert!(!p.delay_slot);
    assert_eq!(p.rd_in.su.pc, 8);
}

// ══════════════════════════════════════════════════════════
// 2. Load/store interlock
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 0)]
fn store_two_behind_a_load_interlocks(#[case] gap: usize, #[case] interlocks: u64) {
    let mut builder = WindowBuilder::new().lw(8, 0, 0);
    for _ in 0..gap {
        builder = builder.nop();
    }
    let words = builder.sw(9, 0, 0).brk().build();
    let p = run_to_break(&words);

    assert_eq!(p.stats.load_store_interlocks, interlocks);
    assert_eq!(p.stats.scalar_hazard_stalls, 0);
}

#[test]
fn coprocessor_moves_interlock_like_memory_ops() {
    // MFC0 t0, $12 / NOP / MTC0 t1, $11
    let words = WindowBuilder::new()
        .op(Opcode::Mfc0, Operands::cop0(8, 12))
        .nop()
        .op(Opcode::Mtc0, Operands::cop0(9, 11))
        .brk()
        .build();
    let p = run_to_break(&words);
    assert_eq!(p.stats.load_store_interlocks, 1);
}
