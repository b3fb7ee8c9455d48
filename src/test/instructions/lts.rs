use super::*;

#[test]
fn compares_the_top_two_entries() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(PUSHS, [int 1]),
            instr!(PUSHS, [int 2]),
            instr!(LTS),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(machine.data_stack(), &[Value::Bool(true)]);
}

#[test]
fn mixed_types_fault() {
    program_faults!(
        [instr!(PUSHS, [int 1]), instr!(PUSHS, [string "2"]), instr!(LTS)],
        53
    );
}
