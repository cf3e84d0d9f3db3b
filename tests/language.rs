use std::{fs, thread};

use entity::{
    error::{Error, ParseError, RuntimeError},
    get_result,
    interpreter::{
        evaluator::{
            binary::BinaryOperator,
            core::{EvalResult, Interpreter, MAX_CALL_DEPTH},
        },
        runtime::Runtime,
        value::{core::Value, primitive::PrimitiveType},
    },
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn demo_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "ent"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = expected_result(&content).unwrap_or_else(|| {
                                                     panic!("{path:?} has no '# expect:' header")
                                                 });

        count += 1;
        match get_result(&content, false) {
            Ok(value) => assert_eq!(value, expected, "{path:?} returned the wrong value"),
            Err(e) => panic!("Demo {path:?} failed:\n{content}\nError: {e}"),
        }
    }

    assert!(count > 0, "No demo programs found in demos");
}

fn expected_result(content: &str) -> Option<i32> {
    content.lines()
           .find_map(|line| line.trim().strip_prefix("# expect:"))
           .and_then(|value| value.trim().parse().ok())
}

fn assert_success(src: &str, expected: i32) {
    match get_result(src, false) {
        Ok(value) => assert_eq!(value, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match get_result(src, false) {
        Ok(value) => panic!("Script returned {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match assert_failure(src) {
        Error::Runtime(e) => e,
        Error::Parse(e) => panic!("Expected a runtime error, got: {e}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match assert_failure(src) {
        Error::Parse(e) => e,
        Error::Runtime(e) => panic!("Expected a parse error, got: {e}"),
    }
}

#[test]
fn globals_and_while_loop() {
    assert_success("int total = 0;
                    int main() {
                        int i = 0;
                        while (i < 5) { total = total + i; i = i + 1; }
                        return total;
                    }",
                   10);
}

#[test]
fn while_body_runs_once_per_true_condition() {
    assert_success("int main() {
                        int runs = 0;
                        int i = 0;
                        while (i < 3) { runs = runs + 1; i = i + 1; }
                        return runs;
                    }",
                   3);
    assert_success("int main() { while (0) { return 1; } return 2; }", 2);
}

#[test]
fn break_unwinds_through_nested_ifs() {
    assert_success("int main() {
                        int i = 0;
                        while (1) {
                            if (i > 2) {
                                if (1) { break; }
                                i = 100;
                            }
                            i = i + 1;
                        }
                        return i;
                    }",
                   3);
}

#[test]
fn break_inside_a_loop_nested_in_ifs() {
    assert_success("int main() {
                        int after = 0;
                        int i = 0;
                        if (1) {
                            if (i < 1) {
                                while (1) {
                                    i = i + 1;
                                    if (i > 4) { break; }
                                }
                                after = after + 10;
                            }
                            after = after + 1;
                        }
                        return after + i;
                    }",
                   16);
}

#[test]
fn continue_reevaluates_the_condition() {
    assert_success("int main() {
                        int i = 0;
                        int skipped = 0;
                        while (i < 6) {
                            i = i + 1;
                            if (i % 2) { skipped = skipped + 1; continue; }
                        }
                        return skipped;
                    }",
                   3);
}

#[test]
fn do_while_runs_body_first() {
    assert_success("int main() { int n = 10; do { n = n + 1; } while (n < 5); return n; }",
                   11);
    assert_success("int main() {
                        int n = 0;
                        do {
                            n = n + 1;
                            if (n < 4) { continue; }
                            break;
                        } while (1);
                        return n;
                    }",
                   4);
}

#[test]
fn return_unwinds_from_loops() {
    assert_success("int find() {
                        int i = 0;
                        while (1) {
                            do { if (i > 6) { return i; } i = i + 1; } while (1);
                        }
                        return 0;
                    }
                    int main() { return find(); }",
                   7);
}

#[test]
fn if_else_chains_run_exactly_one_branch() {
    let program = |n: i32| {
        format!("int main() {{
                     int n = {n};
                     int r = 0;
                     if (n < 1) {{ r = 1; }}
                     else if (n < 2) {{ r = 2; }}
                     else if (n < 3) {{ r = 3; }}
                     else {{ r = 4; }}
                     return r;
                 }}")
    };

    assert_success(&program(0), 1);
    assert_success(&program(1), 2);
    assert_success(&program(2), 3);
    assert_success(&program(9), 4);
}

#[test]
fn skipped_branches_are_not_evaluated() {
    assert_success("int main() {
                        if (0) { return missing(undefined); }
                        else if (0) { int x = 1; int x = 2; }
                        else { return 3; }
                        return 0;
                    }",
                   3);
    assert_success("int main() { if (1) { } else if (nothing) { } else { del(1); } return 5; }",
                   5);
}

#[test]
fn shadowing_and_redefinition() {
    assert_success("int x = 1;
                    int main() {
                        int x = 2;
                        { int x = 3; x = x + 1; }
                        return x;
                    }",
                   2);

    assert_eq!(runtime_error("int main() {\n int x = 1;\n int x = 2;\n return x;\n}"),
               RuntimeError::DuplicateVariable { name: "x".to_string(),
                                                 line: 3, });
}

#[test]
fn block_locals_die_with_their_block() {
    assert_eq!(runtime_error("int main() { { int inner = 1; } return inner; }"),
               RuntimeError::UndefinedVariable { name: "inner".to_string(),
                                                 line: 1, });
}

#[test]
fn callee_cannot_see_caller_locals() {
    assert_eq!(runtime_error("int f() { return x; }
                              int g() { int x = 1; return f(); }
                              int main() { return g(); }"),
               RuntimeError::UndefinedVariable { name: "x".to_string(),
                                                 line: 1, });

    assert_success("int x = 5;
                    int f() { return x; }
                    int g() { int x = 1; return f(); }
                    int main() { return g(); }",
                   5);
}

#[test]
fn arguments_are_evaluated_in_the_caller_scope() {
    assert_success("int add(int a, int b) { return a + b; }
                    int main() { int a = 10; int b = 1; return add(b, a); }",
                   11);
}

#[test]
fn argument_count_errors() {
    assert_eq!(runtime_error("int f(int a) { return a; } int main() { return f(1, 2); }"),
               RuntimeError::TooManyArguments { function: "f".to_string(),
                                                required: 1,
                                                line:     1, });
    assert_eq!(runtime_error("int f(int a, int b) { return a; } int main() { return f(1); }"),
               RuntimeError::TooFewArguments { function: "f".to_string(),
                                               required: 2,
                                               provided: 1,
                                               line:     1, });
    assert_eq!(runtime_error("int f(int a) { return a; } int main() { return f(); }"),
               RuntimeError::TooFewArguments { function: "f".to_string(),
                                               required: 1,
                                               provided: 0,
                                               line:     1, });
}

#[test]
fn argument_type_errors_name_the_position() {
    assert_eq!(runtime_error("int f(int a, float b) { return a; } int main() { return f(1, 2); }"),
               RuntimeError::TypeMismatch { function: "f".to_string(),
                                            position: 2,
                                            expected: PrimitiveType::Float,
                                            actual:   PrimitiveType::Int,
                                            line:     1, });
}

#[test]
fn return_type_is_checked() {
    assert_eq!(runtime_error("int f() { return 1.5; } int main() { return f(); }"),
               RuntimeError::ReturnTypeMismatch { function: "f".to_string(),
                                                  expected: PrimitiveType::Int,
                                                  actual:   PrimitiveType::Float,
                                                  line:     1, });
    assert_eq!(runtime_error("int f() { } int main() { return f(); }"),
               RuntimeError::ReturnTypeMismatch { function: "f".to_string(),
                                                  expected: PrimitiveType::Int,
                                                  actual:   PrimitiveType::Void,
                                                  line:     1, });
    assert_success("void nothing() { return; } int main() { nothing(); return 1; }", 1);
}

#[test]
fn main_must_exist_and_return_int() {
    assert_eq!(runtime_error("int x = 1;"), RuntimeError::MainNotFound);
    assert!(matches!(runtime_error("float main() { return 1.0; }"),
                     RuntimeError::ReturnTypeMismatch { expected: PrimitiveType::Int,
                                                        actual: PrimitiveType::Float,
                                                        .. }));
}

#[test]
fn functions_cannot_be_redefined() {
    assert_eq!(runtime_error("int f() { return 1; }\nint f() { return 2; }\nint main() { return f(); }"),
               RuntimeError::DuplicateFunction { name: "f".to_string(),
                                                 line: 2, });
    assert!(matches!(runtime_error("entity new() { return new(); } int main() { return 0; }"),
                     RuntimeError::DuplicateFunction { .. }));
}

#[test]
fn undefined_function() {
    assert_eq!(runtime_error("int main() { return nope(); }"),
               RuntimeError::UndefinedFunction { name: "nope".to_string(),
                                                 line: 1, });
}

#[test]
fn stray_break_and_continue() {
    assert_eq!(runtime_error("int main() { break; return 0; }"),
               RuntimeError::BreakOutsideLoop { function: "main".to_string(),
                                                line:     1, });
    assert_eq!(runtime_error("int main() { if (1) { continue; } return 0; }"),
               RuntimeError::ContinueOutsideLoop { function: "main".to_string(),
                                                   line:     1, });
}

#[test]
fn recursion() {
    assert_success("int fib(int n) {
                        if (n < 2) { return n; }
                        return fib(n - 1) + fib(n - 2);
                    }
                    int main() { return fib(15); }",
                   610);
}

#[test]
fn integer_division_identity() {
    for (a, b) in [(7, 2), (-7, 2), (7, -2), (-7, -2), (0, 5), (100, 7)] {
        assert_success(&format!("int main() {{ int a = 0 + {a}; int b = 0 + {b}; \
                                 return (a / b) * b + a % b - a; }}"),
                       0);
    }
    assert_success("int main() { return -7 / 2; }", -3);
    assert_success("int main() { return -7 % 2; }", -1);
}

#[test]
fn precedence_and_unary_minus() {
    assert_success("int main() { return 2 + 3 * 4; }", 14);
    assert_success("int main() { return (2 + 3) * 4; }", 20);
    assert_success("int main() { return 10 - 4 - 3; }", 3);
    assert_success("int main() { return -(-3) - -2; }", 5);
    assert_success("int main() { return 1 < 2 < 3; }", 1);
    assert_success("int main() { return 3 > 2 > 1; }", 0);
}

#[test]
fn integer_arithmetic_wraps() {
    assert_success("int main() { return 2147483647 + 1; }", i32::MIN);
}

#[test]
fn division_by_zero() {
    assert_eq!(runtime_error("int main() {\n return 1 / 0;\n}"),
               RuntimeError::DivisionByZero { line: 2 });
    assert_eq!(runtime_error("int main() { return 1 % 0; }"),
               RuntimeError::DivisionByZero { line: 1 });
}

#[test]
fn float_arithmetic() {
    assert_eq!(run("int main() { return 0; } float f() { return 1.5 * 2; }").unwrap(),
               Value::Int(0));
    assert_success("int main() { float x = 2.5; return x * 2 > 4.9; }", 1);
    assert_success("int main() { float x = 1.0 / 4; return x < 0.3; }", 1);
    assert_success("int main() { float x = -0.5; return x < 0; }", 1);
}

#[test]
fn operators_reject_other_types() {
    assert_eq!(runtime_error(r#"int main() { return "a" + 1; }"#),
               RuntimeError::TypeError { op:   BinaryOperator::Add,
                                         lhs:  PrimitiveType::String,
                                         rhs:  PrimitiveType::Int,
                                         line: 1, });
    assert_eq!(runtime_error("int main() { entity e = new(); return -e; }"),
               RuntimeError::TypeError { op:   BinaryOperator::Sub,
                                         lhs:  PrimitiveType::Entity,
                                         rhs:  PrimitiveType::Entity,
                                         line: 1, });
}

#[test]
fn conversions_are_strict() {
    assert_eq!(runtime_error("int main() { int a = 1.5; return a; }"),
               RuntimeError::ConversionError { from: PrimitiveType::Float,
                                               to:   PrimitiveType::Int,
                                               line: 1, });
    assert_eq!(runtime_error("int main() { int a = 1; a = 1.5; return a; }"),
               RuntimeError::AssignmentTypeMismatch { expected: PrimitiveType::Int,
                                                      actual:   PrimitiveType::Float,
                                                      line:     1, });
}

#[test]
fn declarations_default_to_zero() {
    assert_success("int main() { int a, b = 4, c; return a + b + c; }", 4);
    assert_success("int main() { float f; return f < 0.5; }", 1);
}

#[test]
fn conditions_must_be_int() {
    assert_eq!(runtime_error("int main() { if (1.5) { } return 0; }"),
               RuntimeError::NonIntegerCondition { found: PrimitiveType::Float,
                                                   line:  1, });
}

#[test]
fn entity_members() {
    assert_success("int main() {
                        entity e = new();
                        int e.count = 1;
                        float e.weight = 2.5;
                        e.count = e.count + 1;
                        return e.count;
                    }",
                   2);
}

#[test]
fn entities_are_shared_by_handle() {
    assert_success("void grow(entity e) { int e.size = 9; }
                    int main() {
                        entity a = new();
                        entity b = a;
                        grow(b);
                        return a.size;
                    }",
                   9);
}

#[test]
fn nested_member_access() {
    assert_success("int main() {
                        entity outer = new();
                        entity outer.inner = new();
                        entity child = outer.inner;
                        int child.value = 3;
                        outer.inner.value = outer.inner.value * 2;
                        return child.value;
                    }",
                   6);
}

#[test]
fn entity_errors() {
    assert_eq!(runtime_error("int main() { entity e = new(); int e.x = 1; int e.x = 2; return 0; }"),
               RuntimeError::DuplicateMember { name: "x".to_string(),
                                               line: 1, });
    assert_eq!(runtime_error("int main() { entity e = new(); return e.missing; }"),
               RuntimeError::NoSuchMember { name: "missing".to_string(),
                                            line: 1, });
    assert_eq!(runtime_error("int main() { int a = 1; int a.x = 2; return 0; }"),
               RuntimeError::NotAnEntity { found: PrimitiveType::Int,
                                           line:  1, });
    assert_eq!(runtime_error("int main() { int a = 1; return a.x; }"),
               RuntimeError::NotAnEntity { found: PrimitiveType::Int,
                                           line:  1, });
}

#[test]
fn deleted_and_null_entities_dangle() {
    assert_eq!(runtime_error("int main() { entity e = new(); int e.x = 1; del(e); return e.x; }"),
               RuntimeError::DanglingEntity { line: 1 });
    assert_eq!(runtime_error("int main() { entity e; int e.x = 1; return 0; }"),
               RuntimeError::DanglingEntity { line: 1 });
}

#[test]
fn for_is_reserved() {
    assert!(matches!(parse_error("int main() { for (;;) { } return 0; }"),
                     ParseError::ExpectedStatement { line: 1, .. }));
}

#[test]
fn lexical_errors() {
    assert_eq!(parse_error("int main() { return 1 @ 2; }"),
               ParseError::LexError { ch: '@', line: 1 });
    assert_eq!(parse_error("int main() { return 3000000000; }"),
               ParseError::LiteralTooLarge { line: 1 });
    assert!(matches!(parse_error(&format!("int {}; int main() {{ return 0; }}", "a".repeat(65))),
                     ParseError::IdentifierTooLong { .. }));
    assert!(matches!(parse_error("int main() { print(\"open); return 0; }"),
                     ParseError::UnterminatedString { .. }));
}

#[test]
fn grammar_errors() {
    assert!(matches!(parse_error("int main() { return 1 == 1; }"),
                     ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("int main() { + 1; return 0; }"),
                     ParseError::ExpectedStatement { .. }));
    assert!(matches!(parse_error("int main() { return * 2; }"),
                     ParseError::ExpectedExpression { .. }));
    assert!(matches!(parse_error("int main() { return 0;"),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn errors_report_their_line() {
    let err = assert_failure("int main() {\n  int a = 1;\n\n  return a + b;\n}");

    assert_eq!(err.line(), Some(4));
    assert_eq!(err.to_string(), "Error on line 4: No such variable 'b'.");
}

#[test]
fn comments_are_ignored() {
    assert_success("# leading comment\nint main() {\n  # inside\n  return 4; # trailing\n}", 4);
}

fn twice(runtime: &mut Runtime, line: usize) -> EvalResult<Value> {
    let n = runtime.symbols.intern("n");
    let n = runtime.lookup(n, line)?.as_int(line)?;
    Ok(Value::Int(n * 2))
}

#[test]
fn host_natives() {
    let mut interpreter = Interpreter::new("int main() { return twice(21); }").unwrap();
    interpreter.register_native("twice", PrimitiveType::Int, &[("n", PrimitiveType::Int)], twice)
               .unwrap();

    assert_eq!(interpreter.run().unwrap(), Value::Int(42));
    assert!(interpreter.register_native("twice", PrimitiveType::Int, &[], twice)
                       .is_err());
}

#[test]
fn interpreter_state_after_a_run() {
    let mut interpreter = Interpreter::new("int calls = 0;
                                            entity keep;
                                            void touch() { calls = calls + 1; }
                                            int main() {
                                                keep = new();
                                                entity temp = new();
                                                del(temp);
                                                touch(); touch();
                                                { int local = 1; }
                                                return calls;
                                            }").unwrap();

    interpreter.load().unwrap();
    assert_eq!(interpreter.global("calls"), Some(Value::Int(0)));

    assert_eq!(interpreter.call_main().unwrap(), Value::Int(2));
    assert_eq!(interpreter.global("calls"), Some(Value::Int(2)));
    assert_eq!(interpreter.global("local"), None);
    assert_eq!(interpreter.runtime().scopes.depth(), 1);
    assert_eq!(interpreter.runtime().entities.live(), 1);
}

#[test]
fn strings_are_values() {
    assert_success(r#"string s = "one"; int main() { string t = s; t = "two"; print(t); return 0; }"#,
                   0);
    assert_eq!(runtime_error(r#"int main() { string s = "a"; s = 1; return 0; }"#),
               RuntimeError::AssignmentTypeMismatch { expected: PrimitiveType::String,
                                                      actual:   PrimitiveType::Int,
                                                      line:     1, });
}

#[test]
fn members_keep_their_insertion_order() {
    let mut interpreter = Interpreter::new("entity e;
                                            int main() {
                                                e = new();
                                                int e.zeta = 1;
                                                float e.alpha = 2.5;
                                                entity e.middle = new();
                                                e.zeta = 7;
                                                return 0;
                                            }").unwrap();
    assert_eq!(interpreter.run().unwrap(), Value::Int(0));

    let Some(Value::Entity(handle)) = interpreter.global("e") else {
        panic!("'e' does not hold an entity");
    };
    let runtime = interpreter.runtime();
    let entity = runtime.entities.get(handle).unwrap();
    let members: Vec<(&str, Value)> =
        entity.members().map(|(name, value)| (runtime.name(name), value)).collect();

    assert_eq!(entity.len(), 3);
    assert_eq!(members[0], ("zeta", Value::Int(7)));
    assert_eq!(members[1], ("alpha", Value::Float(2.5)));
    assert_eq!(members[2].0, "middle");
}

/// Runs `test` on a thread whose stack fits the deepest allowed call chain.
fn with_large_stack(test: impl FnOnce() + Send + 'static) {
    thread::Builder::new().stack_size(64 * 1024 * 1024)
                          .spawn(test)
                          .unwrap()
                          .join()
                          .unwrap();
}

const DEPTH_PROGRAM: &str = "int depth(int n) { if (n < 1) { return 0; } return 1 + depth(n - 1); }";

#[test]
fn deep_recursion_within_the_limit() {
    with_large_stack(|| {
        assert_success(&format!("{DEPTH_PROGRAM} int main() {{ return depth(150); }}"), 150);
    });
}

#[test]
fn runaway_recursion_is_an_error() {
    with_large_stack(|| {
        assert_eq!(runtime_error(&format!("{DEPTH_PROGRAM} int main() {{ return depth(100000); }}")),
                   RuntimeError::RecursionLimit { function: "depth".to_string(),
                                                  limit:    MAX_CALL_DEPTH,
                                                  line:     1, });
    });
}
