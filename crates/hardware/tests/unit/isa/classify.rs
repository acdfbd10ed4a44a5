//! Opcode Classification.
//!
//! Checks the flag table against the properties the pipeline relies on:
//! lane assignment, bypass eligibility and load/store membership.

use rstest::rstest;

use rspsim_core::isa::opcode::{Opcode, OpcodeFlags, classify, flags_for_index};

#[test]
fn ids_are_contiguous() {
    for (i, op) in Opcode::ALL.into_iter().enumerate() {
        let index = i32::try_from(i).unwrap();
        assert_eq!(op.index(), index);
        assert_eq!(Opcode::from_index(index), Some(op));
    }
    assert_eq!(Opcode::Invalid.index(), -1);
}

#[test]
fn out_of_range_ids_have_no_flags() {
    let count = i32::try_from(Opcode::COUNT).unwrap();
    assert_eq!(flags_for_index(-1), OpcodeFlags::empty());
    assert_eq!(flags_for_index(count), OpcodeFlags::empty());
    assert_eq!(flags_for_index(i32::MAX), OpcodeFlags::empty());
    assert_eq!(classify(Opcode::Invalid), OpcodeFlags::empty());
}

#[rstest]
#[case(Opcode::Addu, true)]
#[case(Opcode::Sll, true)]
#[case(Opcode::Jal, true)]
#[case(Opcode::Lw, false)]
#[case(Opcode::Mfc0, false)]
#[case(Opcode::Sw, false)]
#[case(Opcode::Break, false)]
fn bypass_eligibility(#[case] op: Opcode, #[case] bypass: bool) {
    assert_eq!(op.is_bypassable(), bypass, "{op}");
}

#[test]
fn coprocessor_moves_count_as_load_and_store() {
    for op in [
        Opcode::Mfc0,
        Opcode::Mtc0,
        Opcode::Mfc2,
        Opcode::Mtc2,
        Opcode::Cfc2,
        Opcode::Ctc2,
    ] {
        assert!(op.is_load(), "{op}");
        assert!(op.is_store(), "{op}");
        assert!(!op.is_vu(), "{op}");
    }
}

#[test]
fn vector_memory_issues_on_the_scalar_lane() {
    for op in (Opcode::Lbv.index()..=Opcode::Stv.index()).filter_map(Opcode::from_index) {
        assert!(!op.is_vu(), "{op}");
        assert!(op.is_load() ^ op.is_store(), "{op}");
    }
}

#[test]
fn only_vector_arithmetic_is_vu() {
    let vu: Vec<Opcode> = Opcode::ALL.into_iter().filter(|op| op.is_vu()).collect();
    assert_eq!(vu.first(), Some(&Opcode::Vmulf));
    assert_eq!(vu.last(), Some(&Opcode::Vnop));
    assert!(vu.iter().all(|op| !op.is_branch() && !op.is_load() && !op.is_store()));
}

#[test]
fn branches_carry_exactly_one_kind() {
    for op in Opcode::ALL.into_iter().filter(|op| op.is_branch()) {
        let flags = op.flags();
        assert!(
            flags.contains(OpcodeFlags::BRANCH_COND) != flags.contains(OpcodeFlags::BRANCH_UNCOND),
            "{op}"
        );
    }
    assert!(Opcode::Beq.flags().contains(OpcodeFlags::BRANCH_COND));
    assert!(Opcode::Jr.flags().contains(OpcodeFlags::BRANCH_UNCOND));
}
