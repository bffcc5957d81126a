//! Integration tests for SPL language semantics: arithmetic, strings,
//! comparisons, truthiness, control flow, lists, indexing and ranges.

use spl_eval::{ExecutionResult, Session, Value};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn run(source: &str) -> ExecutionResult {
    Session::new().execute(source)
}

/// Run and return the print output (panics on failure).
fn output(source: &str) -> Vec<String> {
    let r = run(source);
    assert!(r.success, "unexpected failure: {:?}", r.error);
    r.output
}

/// Run and return the final expression value (panics on failure).
fn result(source: &str) -> Value {
    let r = run(source);
    assert!(r.success, "unexpected failure: {:?}", r.error);
    r.result.expect("program should produce a result")
}

/// Run and return the error message (panics on success).
fn error(source: &str) -> String {
    let r = run(source);
    assert!(!r.success, "expected failure for {source:?}");
    r.error.expect("failed result should carry an error")
}

// ─────────────────────────────────────────────────────────────────────
// Arithmetic
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_precedence() {
    assert_eq!(result("2 + 3 * 4"), Value::Number(14.0));
    assert_eq!(result("(2 + 3) * 4"), Value::Number(20.0));
    assert_eq!(result("10 - 3 - 2"), Value::Number(5.0));
}

#[test]
fn test_division() {
    assert_eq!(result("7 / 2"), Value::Number(3.5));
}

#[test]
fn test_division_by_zero() {
    let msg = error("1 / 0");
    assert!(msg.contains("Division by zero"), "{msg}");
}

#[test]
fn test_unary_minus() {
    assert_eq!(result("-5 + 3"), Value::Number(-2.0));
    assert_eq!(result("--5"), Value::Number(5.0));
    assert_eq!(result("-2 * 3"), Value::Number(-6.0));
}

#[test]
fn test_negating_a_string_is_an_error() {
    let msg = error("-\"x\"");
    assert!(msg.contains("negate"), "{msg}");
}

#[test]
fn test_arithmetic_on_mixed_types_is_an_error() {
    let msg = error("1 - \"x\"");
    assert!(msg.contains("'-'"), "{msg}");
    let msg = error("True * 2");
    assert!(msg.contains("'*'"), "{msg}");
}

// ─────────────────────────────────────────────────────────────────────
// Strings & concatenation
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_string_concatenation() {
    assert_eq!(result("\"foo\" + \"bar\""), Value::Str("foobar".into()));
}

#[test]
fn test_plus_coerces_when_either_side_is_a_string() {
    assert_eq!(result("\"n = \" + 42"), Value::Str("n = 42".into()));
    assert_eq!(result("1 + \"x\""), Value::Str("1x".into()));
    assert_eq!(result("\"is \" + True"), Value::Str("is True".into()));
}

#[test]
fn test_plus_on_number_and_bool_is_an_error() {
    let msg = error("1 + True");
    assert!(msg.contains("'+'"), "{msg}");
}

#[test]
fn test_no_list_concatenation() {
    let msg = error("[1] + [2]");
    assert!(msg.contains("'+'"), "{msg}");
}

// ─────────────────────────────────────────────────────────────────────
// Comparisons & equality
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_numeric_comparisons() {
    assert_eq!(result("2 < 3"), Value::Bool(true));
    assert_eq!(result("3 <= 3"), Value::Bool(true));
    assert_eq!(result("2 > 3"), Value::Bool(false));
    assert_eq!(result("3 >= 4"), Value::Bool(false));
}

#[test]
fn test_string_ordering_is_lexicographic() {
    assert_eq!(result("\"apple\" < \"banana\""), Value::Bool(true));
    assert_eq!(result("\"b\" >= \"b\""), Value::Bool(true));
}

#[test]
fn test_ordering_across_types_is_an_error() {
    let msg = error("1 < \"2\"");
    assert!(msg.contains("'<'"), "{msg}");
}

#[test]
fn test_equality() {
    assert_eq!(result("1 == 1"), Value::Bool(true));
    assert_eq!(result("1 != 2"), Value::Bool(true));
    assert_eq!(result("\"a\" == \"a\""), Value::Bool(true));
    assert_eq!(result("[1, 2] == [1, 2]"), Value::Bool(true));
    assert_eq!(result("[1, 2] == [1, 3]"), Value::Bool(false));
}

#[test]
fn test_equality_across_types_is_false_not_an_error() {
    assert_eq!(result("1 == \"1\""), Value::Bool(false));
    assert_eq!(result("True == 1"), Value::Bool(false));
    assert_eq!(result("0 != False"), Value::Bool(true));
}

// ─────────────────────────────────────────────────────────────────────
// Print & display forms
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_print_joins_arguments_with_spaces() {
    assert_eq!(output("print(\"x is\", 5)"), vec!["x is 5"]);
}

#[test]
fn test_print_empty_line() {
    assert_eq!(output("print()"), vec![""]);
}

#[test]
fn test_integral_numbers_print_without_decimal() {
    assert_eq!(output("print(10 / 2)"), vec!["5"]);
    assert_eq!(output("print(2.5 + 2.5)"), vec!["5"]);
    assert_eq!(output("print(1 / 4)"), vec!["0.25"]);
}

#[test]
fn test_booleans_print_capitalized() {
    assert_eq!(output("print(1 < 2, 1 > 2)"), vec!["True False"]);
}

#[test]
fn test_lists_print_with_nested_strings_quoted() {
    assert_eq!(output("print([1, \"two\", True])"), vec!["[1, \"two\", True]"]);
    assert_eq!(output("print(\"two\")"), vec!["two"]);
}

// ─────────────────────────────────────────────────────────────────────
// Truthiness & conditionals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_if_else() {
    assert_eq!(output("if 2 > 1 { print(\"yes\") } else { print(\"no\") }"), vec!["yes"]);
    assert_eq!(output("if 2 < 1 { print(\"yes\") } else { print(\"no\") }"), vec!["no"]);
}

#[test]
fn test_if_without_else_skips_silently() {
    assert_eq!(output("if False { print(\"x\") }"), Vec::<String>::new());
}

#[test]
fn test_falsy_values() {
    for falsy in ["False", "0", "\"\"", "[]"] {
        let src = format!("if {falsy} {{ print(\"t\") }} else {{ print(\"f\") }}");
        assert_eq!(output(&src), vec!["f"], "{falsy} should be falsy");
    }
}

#[test]
fn test_truthy_values() {
    for truthy in ["True", "1", "-1", "\"x\"", "[0]", "range(3)"] {
        let src = format!("if {truthy} {{ print(\"t\") }} else {{ print(\"f\") }}");
        assert_eq!(output(&src), vec!["t"], "{truthy} should be truthy");
    }
}

#[test]
fn test_empty_range_is_falsy() {
    assert_eq!(
        output("if range(0) { print(\"t\") } else { print(\"f\") }"),
        vec!["f"]
    );
    assert_eq!(
        output("if range(5, 5) { print(\"t\") } else { print(\"f\") }"),
        vec!["f"]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Loops
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_while_loop() {
    let src = "i = 0\nwhile i < 3 {\n  print(i)\n  i = i + 1\n}";
    assert_eq!(output(src), vec!["0", "1", "2"]);
}

#[test]
fn test_while_with_break() {
    let src = "i = 0\nwhile True {\n  if i == 3 { break }\n  print(i)\n  i = i + 1\n}";
    assert_eq!(output(src), vec!["0", "1", "2"]);
}

#[test]
fn test_for_over_range() {
    assert_eq!(output("for i in range(3) { print(i) }"), vec!["0", "1", "2"]);
    assert_eq!(output("for i in range(1, 4) { print(i) }"), vec!["1", "2", "3"]);
    assert_eq!(
        output("for i in range(10, 0, -3) { print(i) }"),
        vec!["10", "7", "4", "1"]
    );
}

#[test]
fn test_for_over_list() {
    assert_eq!(
        output("for x in [\"a\", \"b\"] { print(x) }"),
        vec!["a", "b"]
    );
}

#[test]
fn test_for_with_break() {
    let src = "for i in range(10) {\n  if i == 2 { break }\n  print(i)\n}";
    assert_eq!(output(src), vec!["0", "1"]);
}

#[test]
fn test_break_only_exits_innermost_loop() {
    let src = "for i in range(2) {\n  for j in range(10) {\n    if j == 1 { break }\n    print(i, j)\n  }\n}";
    assert_eq!(output(src), vec!["0 0", "1 0"]);
}

#[test]
fn test_break_outside_loop_is_an_error() {
    let msg = error("break");
    assert!(msg.contains("outside loop"), "{msg}");
}

#[test]
fn test_break_in_if_outside_loop_is_an_error() {
    let msg = error("if True { break }");
    assert!(msg.contains("outside loop"), "{msg}");
}

#[test]
fn test_loop_variable_persists_after_loop() {
    assert_eq!(output("for i in range(3) { }\nprint(i)"), vec!["2"]);
}

#[test]
fn test_iterating_a_number_is_an_error() {
    let msg = error("for i in 5 { }");
    assert!(msg.contains("not iterable"), "{msg}");
}

// ─────────────────────────────────────────────────────────────────────
// Lists & indexing
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_list_indexing() {
    assert_eq!(output("xs = [10, 20, 30]\nprint(xs[0], xs[2])"), vec!["10 30"]);
}

#[test]
fn test_index_with_expression() {
    assert_eq!(output("xs = [10, 20, 30]\ni = 1\nprint(xs[i + 1])"), vec!["30"]);
}

#[test]
fn test_nested_list_access_through_a_variable() {
    assert_eq!(
        output("grid = [[1, 2], [3, 4]]\nrow = grid[1]\nprint(row[0])"),
        vec!["3"]
    );
}

#[test]
fn test_index_out_of_range() {
    let msg = error("xs = [1, 2, 3]\nxs[3]");
    assert!(msg.contains("out of range"), "{msg}");
    assert!(msg.contains("length 3"), "{msg}");
}

#[test]
fn test_negative_index_is_an_error() {
    let msg = error("xs = [1, 2, 3]\nxs[-1]");
    assert!(msg.contains("out of range"), "{msg}");
}

#[test]
fn test_fractional_index_is_an_error() {
    let msg = error("xs = [1, 2]\nxs[0.5]");
    assert!(msg.contains("integer"), "{msg}");
}

#[test]
fn test_string_index_is_an_error() {
    let msg = error("xs = [1, 2]\nxs[\"0\"]");
    assert!(msg.contains("must be a number"), "{msg}");
}

#[test]
fn test_indexing_a_number_is_an_error() {
    let msg = error("x = 5\nx[0]");
    assert!(msg.contains("not indexable"), "{msg}");
}

// ─────────────────────────────────────────────────────────────────────
// range()
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_range_wrong_arity() {
    let msg = error("range()");
    assert!(msg.contains("1 to 3 arguments"), "{msg}");
    let msg = error("range(1, 2, 3, 4)");
    assert!(msg.contains("1 to 3 arguments"), "{msg}");
}

#[test]
fn test_range_zero_step() {
    let msg = error("range(0, 5, 0)");
    assert!(msg.contains("step"), "{msg}");
}

#[test]
fn test_range_argument_must_be_a_number() {
    let msg = error("range(\"3\")");
    assert!(msg.contains("numbers"), "{msg}");
}

#[test]
fn test_range_arguments_truncate_toward_zero() {
    assert_eq!(output("for i in range(2.9) { print(i) }"), vec!["0", "1"]);
}

#[test]
fn test_range_is_a_first_class_value() {
    let src = "r = range(3)\nfor i in r { print(i) }\nfor i in r { print(i) }";
    assert_eq!(output(src), vec!["0", "1", "2", "0", "1", "2"]);
}

#[test]
fn test_empty_range_loops_zero_times() {
    assert_eq!(output("for i in range(0) { print(i) }"), Vec::<String>::new());
    assert_eq!(output("for i in range(5, 1) { print(i) }"), Vec::<String>::new());
}

// ─────────────────────────────────────────────────────────────────────
// Results & errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_result_is_final_expression_value() {
    assert_eq!(result("x = 2\nx * 3"), Value::Number(6.0));
}

#[test]
fn test_assignment_yields_its_value_as_result() {
    assert_eq!(result("x = 2"), Value::Number(2.0));
}

#[test]
fn test_no_result_when_final_statement_is_a_print() {
    let r = run("1 + 1\nprint(2)");
    assert!(r.success);
    assert_eq!(r.result, None);
}

#[test]
fn test_undefined_variable() {
    let msg = error("print(nope)");
    assert!(msg.contains("Variable 'nope' is not defined"), "{msg}");
}

#[test]
fn test_error_stops_execution() {
    let r = run("print(1)\n1 / 0\nprint(2)");
    assert!(!r.success);
    assert_eq!(r.output, vec!["1"]);
}

#[test]
fn test_step_limit_aborts_infinite_loop() {
    let r = Session::with_step_limit(1_000).execute("while True { }");
    assert!(!r.success);
    assert!(r.error.unwrap().contains("exceeded 1000 steps"));
}

#[test]
fn test_output_before_step_limit_abort_is_kept() {
    let r = Session::with_step_limit(1_000).execute("print(\"start\")\nwhile True { }");
    assert!(!r.success);
    assert_eq!(r.output, vec!["start"]);
}
