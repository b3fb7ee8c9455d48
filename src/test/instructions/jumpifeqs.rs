use super::*;

#[test]
fn pops_both_operands_and_jumps() {
    let (result, machine, output, _) = run_instructions(
        vec![
            instr!(PUSHS, [int 1]),
            instr!(PUSHS, [int 1]),
            instr!(JUMPIFEQS, [label end]),
            instr!(WRITE, [string "skipped"]),
            instr!(LABEL, [label end]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(output, "");
    assert!(machine.data_stack().is_empty());
}

#[test]
fn pops_both_operands_when_falling_through() {
    let (result, machine, output, _) = run_instructions(
        vec![
            instr!(PUSHS, [int 1]),
            instr!(PUSHS, [int 2]),
            instr!(JUMPIFEQS, [label end]),
            instr!(WRITE, [string "ran"]),
            instr!(LABEL, [label end]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(output, "ran");
    assert!(machine.data_stack().is_empty());
}

#[test]
fn underflow_faults() {
    program_faults!(
        [
            instr!(PUSHS, [int 1]),
            instr!(JUMPIFEQS, [label end]),
            instr!(LABEL, [label end]),
        ],
        56
    );
}
