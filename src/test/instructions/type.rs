use super::*;

#[test]
fn names_each_value_type() {
    for (arg, expected) in vec![
        (arg!(int 1), "int"),
        (arg!(string "x"), "string"),
        (arg!(bool true), "bool"),
        (arg!(nil), "nil"),
    ] {
        let (result, machine, _, _) = run_instructions(
            vec![
                instr!(DEFVAR, [var GF@r]),
                Instruction::new(0, Opcode::TYPE, vec![arg!(var GF@r), arg]),
            ],
            "",
        );

        result.expect("program runs");
        assert_eq!(global(&machine, "r"), Value::Str(expected.to_string()));
    }
}

#[test]
fn unset_variable_yields_the_empty_string() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@a]),
            instr!(DEFVAR, [var GF@r]),
            instr!(TYPE, [var GF@r], [var GF@a]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Str(String::new()));
}

#[test]
fn undefined_variable_still_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(TYPE, [var GF@r], [var GF@missing]),
        ],
        54
    );
}

#[test]
fn set_variable_reports_its_tag() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@a]),
            instr!(DEFVAR, [var GF@r]),
            instr!(MOVE, [var GF@a], [bool false]),
            instr!(TYPE, [var GF@r], [var GF@a]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "r"), Value::Str("bool".to_string()));
}
