use super::*;

#[test]
fn defines_an_unset_slot() {
    let (result, machine, _, _) =
        run_instructions(vec![instr!(DEFVAR, [var GF@a])], "");

    result.expect("program runs");
    assert_eq!(machine.frames().global().slot("a"), Some(&None));
}

#[test]
fn redefinition_faults() {
    program_faults!(
        [instr!(DEFVAR, [var GF@a]), instr!(DEFVAR, [var GF@a])],
        52
    );
}

#[test]
fn same_name_in_different_frames_is_allowed() {
    program_writes!(
        [
            instr!(DEFVAR, [var GF@a]),
            instr!(CREATEFRAME),
            instr!(DEFVAR, [var TF@a]),
        ],
        ""
    );
}

#[test]
fn missing_temporary_frame_faults() {
    program_faults!([instr!(DEFVAR, [var TF@a])], 55);
}

#[test]
fn empty_local_stack_faults() {
    program_faults!([instr!(DEFVAR, [var LF@a])], 55);
}
