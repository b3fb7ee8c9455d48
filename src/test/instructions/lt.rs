use super::*;

#[test]
fn orders_ints_numerically() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(LT, [var GF@r], [int -1], [int 1]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Bool(true));
}

#[test]
fn orders_strings_lexicographically() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(LT, [var GF@r], [string "abc"], [string "abd"]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Bool(true));
}

#[test]
fn false_is_below_true() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(LT, [var GF@r], [bool false], [bool true]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Bool(true));
}

#[test]
fn equal_operands_compare_false() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(LT, [var GF@r], [int 5], [int 5]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Bool(false));
}

#[test]
fn mixed_types_fault() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(LT, [var GF@r], [int 1], [string "1"]),
        ],
        53
    );
}

#[test]
fn nil_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(LT, [var GF@r], [nil], [nil]),
        ],
        53
    );
}
