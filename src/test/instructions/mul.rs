use super::*;

#[test]
fn multiplies() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(MUL, [var GF@r], [int 6], [int 7]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Int(42));
}

#[test]
fn wraps_on_overflow() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(MUL, [var GF@r], [int i64::max_value()], [int 2]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Int(-2));
}

#[test]
fn string_operand_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(MUL, [var GF@r], [string "6"], [int 7]),
        ],
        53
    );
}
