use super::*;

#[test]
fn adds_two_ints() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(ADD, [var GF@r], [int 40], [int 2]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Int(42));
}

#[test]
fn negative_operand() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(ADD, [var GF@r], [int -40], [int 2]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Int(-38));
}

#[test]
fn wraps_on_overflow() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(ADD, [var GF@r], [int i64::max_value()], [int 1]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Int(i64::min_value()));
}

#[test]
fn string_operand_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(ADD, [var GF@r], [int 1], [string "2"]),
        ],
        53
    );
}

#[test]
fn nil_operand_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(ADD, [var GF@r], [nil], [int 2]),
        ],
        53
    );
}
