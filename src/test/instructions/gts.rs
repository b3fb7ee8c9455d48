use super::*;

#[test]
fn top_of_stack_is_the_right_operand() {
    let (result, machine, _, _) = run_instructions(
        vec![
            instr!(PUSHS, [string "b"]),
            instr!(PUSHS, [string "a"]),
            instr!(GTS),
        ],
        "",
    );

    result.expect("program runs");
    assert_eq!(machine.data_stack(), &[Value::Bool(true)]);
}
