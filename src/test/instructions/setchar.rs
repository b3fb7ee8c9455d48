use super::*;

#[test]
fn replaces_one_character_in_place() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@s]),
            instr!(MOVE, [var GF@s], [string "hello"]),
            instr!(SETCHAR, [var GF@s], [int 0], [string "J"]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "s"), Value::Str("Jello".to_string()));
}

#[test]
fn uses_only_the_first_replacement_character() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(DEFVAR, [var GF@s]),
            instr!(MOVE, [var GF@s], [string "abc"]),
            instr!(SETCHAR, [var GF@s], [int 1], [string "XYZ"]),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(global(&machine, "s"), Value::Str("aXc".to_string()));
}

#[test]
fn empty_replacement_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@s]),
            instr!(MOVE, [var GF@s], [string "abc"]),
            instr!(SETCHAR, [var GF@s], [int 0], [string ""]),
        ],
        58
    );
}

#[test]
fn index_out_of_range_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@s]),
            instr!(MOVE, [var GF@s], [string "abc"]),
            instr!(SETCHAR, [var GF@s], [int 3], [string "x"]),
        ],
        58
    );
}

#[test]
fn non_string_target_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@s]),
            instr!(MOVE, [var GF@s], [int 5]),
            instr!(SETCHAR, [var GF@s], [int 0], [string "x"]),
        ],
        53
    );
}

#[test]
fn unset_target_faults() {
    program_faults!(
        [
            instr!(DEFVAR, [var GF@s]),
            instr!(SETCHAR, [var GF@s], [int 0], [string "x"]),
        ],
        56
    );
}
