use super::*;

#[test]
fn multiplies_the_top_two_entries() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(PUSHS, [int 6]),
            instr!(PUSHS, [int 7]),
            instr!(MULS),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(machine.data_stack(), &[Value::Int(42)]);
}
