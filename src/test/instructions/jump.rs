use super::*;

#[test]
fn jumps_forward() {
    program_writes!(
        [
            instr!(JUMP, [label end]),
            instr!(WRITE, [string "skipped"]),
            instr!(LABEL, [label end]),
        ],
        ""
    );
}

#[test]
fn jumps_backward() {
    program_writes!(
        [
            instr!(DEFVAR, [var GF@n]),
            instr!(MOVE, [var GF@n], [int 0]),
            instr!(LABEL, [label again]),
            instr!(WRITE, [string "x"]),
            instr!(ADD, [var GF@n], [var GF@n], [int 1]),
            instr!(JUMPIFEQ, [label end], [var GF@n], [int 3]),
            instr!(JUMP, [label again]),
            instr!(LABEL, [label end]),
        ],
        "xxx"
    );
}

#[test]
fn unknown_label_faults() {
    program_faults!([instr!(JUMP, [label nowhere])], 52);
}
