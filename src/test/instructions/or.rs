use super::*;

#[test]
fn truth_table() {
    for (x, y, expected) in &[
        (true, true, true),
        (true, false, true),
        (false, true, true),
        (false, false, false),
    ] {
        let (result, machine, _, _) = run_instructions(
            vec![
                instr!(DEFVAR, [var GF@r]),
                instr!(OR, [var GF@r], [bool *x], [bool *y]),
            ],
            "",
        );

        result.expect("program runs");
        assert_eq!(global(&machine, "r"), Value::Bool(*expected));
    }
}

#[test]
fn nil_operand_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@r]),
            instr!(OR, [var GF@r], [nil], [bool true]),
        ],
        53
    );
}
