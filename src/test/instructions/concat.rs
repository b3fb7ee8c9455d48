use super::*;

#[test]
fn concatenates_two_strings() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(CONCAT, [var GF@r], [string "foo"], [string "bar"]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Str("foobar".to_string()));
}

#[test]
fn empty_operands_are_fine() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@r]),
            instr!(CONCAT, [var GF@r], [string ""], [string ""]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Str(String::new()));
}

#[test]
fn int_operand_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(CONCAT, [var GF@r], [string "n="], [int 1]),
        ],
        53
    );
}
