use super::*;

#[test]
fn jumps_when_equal() {
    program_writes!(
        [
            instr!(JUMPIFEQ, [label end], [int 1], [int 1]),
            instr!(WRITE, [string "skipped"]),
            instr!(LABEL, [label end]),
        ],
        ""
    );
}

#[test]
fn falls_through_when_not_equal() {
    program_writes!(
        [
            instr!(JUMPIFEQ, [label end], [int 1], [int 2]),
            instr!(WRITE, [string "ran"]),
            instr!(LABEL, [label end]),
        ],
        "ran"
    );
}

#[test]
fn nil_only_matches_nil() {
    program_writes!(
        [
            instr!(JUMPIFEQ, [label end], [nil], [int 1]),
            instr!(WRITE, [string "ran"]),
            instr!(LABEL, [label end]),
        ],
        "ran"
    );
}

#[test]
fn mismatched_types_fault() {
    program_faults!(
        [
            instr!(JUMPIFEQ, [label end], [int 1], [string "1"]),
            instr!(LABEL, [label end]),
        ],
        53
    );
}

#[test]
fn unknown_label_faults_even_when_the_condition_is_false() {
    program_faults!([instr!(JUMPIFEQ, [label nowhere], [int 1], [int 2])], 52);
}
