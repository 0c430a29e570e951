use polycalc::{calculator::Calculator, parser::MAX_NESTING_DEPTH};

fn run(input: &str) -> (String, String) {
    let mut out = vec![];
    let mut err = vec![];
    Calculator::new()
        .run(input.as_bytes(), &mut out, &mut err)
        .unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn check(input: &str, out: &str, err: &str) {
    let (o, e) = run(input);
    assert_eq!(o, out, "stdout for {:?}", input);
    assert_eq!(e, err, "stderr for {:?}", input);
}

#[test]
fn print_sorts_monomials() {
    check("(1,2)+(3,0)\nPRINT\n", "(3,0)+(1,2)\n", "");
}

#[test]
fn clone_and_add() {
    check("(1,1)\nCLONE\nADD\nPRINT\n", "(2,1)\n", "");
    check(
        "(1,1)\n(2,1)+(1,0)\nADD\nPRINT\nPOP\nPRINT\n",
        "(1,0)+(3,1)\n",
        "ERROR 6 STACK UNDERFLOW\n",
    );
}

#[test]
fn multiply() {
    check("(1,1)+(1,0)\nCLONE\nMUL\nPRINT\n", "(1,0)+(2,1)+(1,2)\n", "");
}

#[test]
fn negate_and_subtract() {
    check("(1,1)+(2,0)\nNEG\nPRINT\n", "(-2,0)+(-1,1)\n", "");
    check("(1,1)\n(1,1)+(5,0)\nSUB\nPRINT\n", "5\n", "");
}

#[test]
fn predicates() {
    check(
        "0\nIS_ZERO\nIS_COEFF\n(1,1)\nIS_ZERO\nIS_COEFF\n",
        "1\n1\n0\n0\n",
        "",
    );
    check(
        "(1,2)+(3,0)\n(3,0)+(1,2)\nIS_EQ\n(3,0)\nIS_EQ\n",
        "1\n0\n",
        "",
    );
}

#[test]
fn degrees() {
    check(
        "((1,2),3)\nDEG\nDEG_BY 0\nDEG_BY 1\nDEG_BY 2\n",
        "5\n3\n2\n0\n",
        "",
    );
    check("ZERO\nDEG\nDEG_BY 3\n", "-1\n-1\n", "");
    check(
        "1\nDEG_BY 4294967295\nDEG_BY 4294967296\n",
        "0\n",
        "ERROR 3 WRONG VARIABLE\n",
    );
}

#[test]
fn evaluate() {
    check("(1,1)\nAT 4\nPRINT\n", "4\n", "");
    check("(1,2)+(-1,0)\nAT -3\nPRINT\n", "8\n", "");
    check("((1,1),1)\nAT 2\nPRINT\n", "(2,1)\n", "");
    check(
        "(1,1)\nAT\nAT 1x\nAT 99999999999999999999\n",
        "",
        "ERROR 2 WRONG VALUE\nERROR 3 WRONG VALUE\nERROR 4 WRONG VALUE\n",
    );
}

#[test]
fn compose() {
    check("7\n(1,1)\nCOMPOSE 1\nPRINT\n", "7\n", "");
    check("(1,1)+(1,0)\n(1,2)\nCOMPOSE 1\nPRINT\n", "(1,0)+(2,1)+(1,2)\n", "");
    check("(1,1)+(3,0)\nCOMPOSE 0\nPRINT\n", "3\n", "");
    check("0\nCOMPOSE 0\n", "", "");
}

#[test]
fn compose_arguments() {
    check("COMPOSE\n", "", "ERROR 1 WRONG COUNT\n");
    check("COMPOSE 4294967295\n", "", "ERROR 1 STACK UNDERFLOW\n");
    check("COMPOSE -1\n", "", "ERROR 1 WRONG COUNT\n");
    check("COMPOSE 4294967296\n", "", "ERROR 1 WRONG COUNT\n");
    check("COMPOSE 13333333333333337\n", "", "ERROR 1 WRONG COUNT\n");
    check("COMPOSE abcd\n", "", "ERROR 1 WRONG COUNT\n");
    check("COMPOSE 32b1cd9\n", "", "ERROR 1 WRONG COUNT\n");
    check("COMPOSE  1\n", "", "ERROR 1 WRONG COUNT\n");
}

#[test]
fn wrong_commands() {
    check(
        "FOO\nADD 1\nprint\nPRINTPRINTPRINT\nADD\n",
        "",
        "ERROR 1 WRONG COMMAND\nERROR 2 WRONG COMMAND\nERROR 3 WRONG COMMAND\n\
         ERROR 4 WRONG COMMAND\nERROR 5 STACK UNDERFLOW\n",
    );
    check("ZERO\nPRINT", "", "ERROR 2 WRONG COMMAND\n");
}

#[test]
fn literal_errors() {
    check("99999999999999999990\n", "", "ERROR 1 20\n");
    check("9300000000000000000\n", "", "ERROR 1 19\n");
    check("(1,3000000000)\n", "", "ERROR 1 13\n");
    check("(1,99999999999)\n", "", "ERROR 1 13\n");
    check("\n", "", "ERROR 1 1\n");
    check("1\n(1,2\nPRINT\n", "1\n", "ERROR 2 5\n");
    check("(1,2)+\n", "", "ERROR 1 7\n");
    check("(1,-1)\n", "", "ERROR 1 5\n");
    check("(1,-0)\nPRINT\n", "1\n", "");
    check("(1,2)", "", "ERROR 1 6\n");
    check(" (1,2)\n", "", "ERROR 1 1\n");
}

#[test]
fn errors_leave_stack_untouched() {
    check(
        "(1,3)\n(1,\nMUL\nAT q\nPRINT\n",
        "(1,3)\n",
        "ERROR 2 4\nERROR 3 STACK UNDERFLOW\nERROR 4 WRONG VALUE\n",
    );
}

#[test]
fn wrapping_arithmetic() {
    check("9223372036854775807\n1\nADD\nPRINT\n", "-9223372036854775808\n", "");
    check("(2,1)\nAT 2\n(1,62)\nAT 2\nMUL\nPRINT\n", "0\n", "");
}

fn nested_literal(depth: usize) -> String {
    let mut text = "(".repeat(depth);
    text.push('1');
    text.push_str(&",1)".repeat(depth));
    text
}

#[test]
fn nesting_depth_limit() {
    let deepest = nested_literal(MAX_NESTING_DEPTH);
    check(
        &format!("{}\nCLONE\nIS_EQ\nDEG\nPRINT\n", deepest),
        &format!("1\n{}\n{}\n", MAX_NESTING_DEPTH, deepest),
        "",
    );

    check(
        &format!("{}\nIS_ZERO\nPRINT\n", nested_literal(300_000)),
        "",
        &format!(
            "ERROR 1 {}\nERROR 2 STACK UNDERFLOW\nERROR 3 STACK UNDERFLOW\n",
            MAX_NESTING_DEPTH + 1
        ),
    );
}
