use std::collections::HashMap;

use expreval::{
    error::{ErrorKind, EvalError},
    interpreter::{
        engine::{Collection, Engine},
        variable::Variable,
    },
};

fn loaded(expression: &str) -> Engine {
    let mut engine = Engine::new();
    engine.load(expression)
          .unwrap_or_else(|e| panic!("`{expression}` failed to load: {e}"));
    engine
}

#[test]
fn new_engine_has_no_error() {
    let engine = Engine::new();
    assert_eq!(engine.last_error(), ErrorKind::Ok);
    assert_eq!(engine.expression(), "");
    assert_eq!(engine.variable_count(), 0);
}

#[test]
fn evaluating_without_load_is_empty_expression() {
    let mut engine = Engine::new();
    assert_eq!(engine.evaluate(), Err(EvalError::EmptyExpression));
    assert_eq!(engine.last_error(), ErrorKind::EmptyExpression);
}

#[test]
fn scan_discovers_each_variable_once_in_order() {
    let engine = loaded("b + a * b - (c / a)");
    let names: Vec<char> = engine.variables().iter().map(Variable::name).collect();
    assert_eq!(names, vec!['b', 'a', 'c']);
    assert!(engine.variables().iter().all(|v| !v.is_set() && v.value() == 0.0));
}

#[test]
fn scan_accepts_separated_letters() {
    let engine = loaded("a b");
    assert_eq!(engine.variable_count(), 2);
}

#[test]
fn scan_finds_no_variables_in_constant_expression() {
    assert_eq!(loaded("1 + 2").variable_count(), 0);
}

#[test]
fn failed_load_sets_error_and_keeps_no_variables() {
    let mut engine = Engine::new();
    assert_eq!(engine.load("a + bc"), Err(EvalError::VariableNameTooLong { position: 5 }));
    assert_eq!(engine.last_error(), ErrorKind::VariableNameTooLong);
    assert_eq!(engine.variable_count(), 0);

    assert_eq!(engine.load(""), Err(EvalError::EmptyExpression));
    assert_eq!(engine.last_error(), ErrorKind::EmptyExpression);

    assert_eq!(engine.load("((x)"), Err(EvalError::UnmatchedBraces { position: 4 }));
    assert_eq!(engine.last_error(), ErrorKind::UnmatchedBraces);
}

#[test]
fn failed_load_leaves_nothing_to_evaluate() {
    let mut engine = loaded("1 + 1");
    assert!(engine.load("ab+1").is_err());
    assert_eq!(engine.expression(), "");
    assert_eq!(engine.evaluate(), Err(EvalError::EmptyExpression));
    assert_eq!(engine.last_error(), ErrorKind::EmptyExpression);
}

#[test]
fn unmatched_braces_are_caught_before_evaluation() {
    // The body would fail evaluation too, but the scan reports first.
    let mut engine = Engine::new();
    let err = engine.load("(1 + + 2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnmatchedBraces);
}

#[test]
fn successful_load_starts_a_new_session() {
    let mut engine = loaded("a + b");
    engine.load("x").unwrap();
    assert_eq!(engine.expression(), "x");
    assert_eq!(engine.variable_count(), 1);
    assert!(engine.variable('a').is_none());
    assert_eq!(engine.last_error(), ErrorKind::Ok);
}

#[test]
fn collection_requests_values_in_discovery_order_with_defaults() {
    let mut engine = loaded("y - x");
    let mut requests = Vec::new();
    let mut source = |name: char, default: f64| -> Option<f64> {
        requests.push((name, default));
        Some(if name == 'y' { 10.0 } else { 4.0 })
    };

    assert_eq!(engine.collect_variables(&mut source), Collection::Complete);
    assert_eq!(requests, vec![('y', 0.0), ('x', 0.0)]);
    assert_eq!(engine.evaluate(), Ok(6.0));

    let y = engine.variable('y').unwrap();
    assert!(y.is_set());
    assert_eq!(y.value(), 10.0);
}

#[test]
fn later_rounds_offer_previous_values_as_defaults() {
    let mut engine = loaded("a * 2");
    let mut first = HashMap::from([('a', 3.0)]);
    assert_eq!(engine.run_round(&mut first), Ok(Some(6.0)));

    let mut seen = None;
    let mut keep_default = |_name: char, default: f64| -> Option<f64> {
        seen = Some(default);
        Some(default)
    };
    assert_eq!(engine.run_round(&mut keep_default), Ok(Some(6.0)));
    assert_eq!(seen, Some(3.0));
}

#[test]
fn rounds_reflect_only_the_new_values() {
    let mut engine = loaded("(a + 10) * 50 / ((b - 6) * 9)");

    let mut first = HashMap::from([('a', 0.0), ('b', 8.0)]);
    let result = engine.run_round(&mut first).unwrap().unwrap();
    assert!((result - 500.0 / 18.0).abs() < 1e-12);

    let mut second = HashMap::from([('a', 8.0), ('b', 7.0)]);
    assert_eq!(engine.run_round(&mut second), Ok(Some(100.0)));

    let mut third = HashMap::from([('a', 0.0), ('b', 8.0)]);
    assert_eq!(engine.run_round(&mut third), Ok(Some(result)));
}

#[test]
fn cancelled_collection_changes_nothing() {
    let mut engine = loaded("a + b + c");
    let mut initial = HashMap::from([('a', 1.0), ('b', 2.0), ('c', 3.0)]);
    assert_eq!(engine.collect_variables(&mut initial), Collection::Complete);

    let mut cancel_at_c = |name: char, _default: f64| -> Option<f64> {
        if name == 'c' { None } else { Some(100.0) }
    };
    assert_eq!(engine.collect_variables(&mut cancel_at_c), Collection::Cancelled);
    assert_eq!(engine.run_round(&mut cancel_at_c), Ok(None));

    let values: Vec<f64> = engine.variables().iter().map(Variable::value).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
    assert_eq!(engine.evaluate(), Ok(6.0));
}

#[test]
fn cancelled_round_leaves_error_state_alone() {
    let mut engine = loaded("a / 0");
    assert!(engine.evaluate().is_err());
    assert_eq!(engine.last_error(), ErrorKind::DivideByZero);

    let mut cancel = |_name: char, _default: f64| -> Option<f64> { None };
    assert_eq!(engine.run_round(&mut cancel), Ok(None));
    assert_eq!(engine.last_error(), ErrorKind::DivideByZero);
}

#[test]
fn error_state_holds_the_deepest_failure() {
    let mut engine = loaded("1 + (2 * (3 / 0))");
    let err = engine.evaluate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EvaluationFailed);
    assert_eq!(engine.last_error(), ErrorKind::DivideByZero);
    assert_eq!(engine.last_error().description(), "Syntax error: divide by 0");
}

#[test]
fn successful_evaluation_resets_error_state() {
    let mut engine = loaded("1 / x");
    assert!(engine.evaluate().is_err());
    assert!(engine.last_error().is_error());

    let mut values = HashMap::from([('x', 4.0)]);
    assert_eq!(engine.run_round(&mut values), Ok(Some(0.25)));
    assert_eq!(engine.last_error(), ErrorKind::Ok);
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let mut engine = loaded("(a - 0.1) * 3 / (b + 0.7) - a / 7");
    let mut values = HashMap::from([('a', 1.3), ('b', 2.9)]);
    assert_eq!(engine.collect_variables(&mut values), Collection::Complete);

    let first = engine.evaluate().unwrap();
    for _ in 0..10 {
        assert_eq!(engine.evaluate().unwrap().to_bits(), first.to_bits());
    }
}

#[test]
fn deep_nesting_evaluates() {
    let depth = 200;
    let expression = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let mut engine = loaded(&expression);
    assert_eq!(engine.evaluate(), Ok(1.0));
}

#[test]
fn deep_nesting_followed_by_long_tail_evaluates() {
    let depth = 150;
    let terms = 20_000;
    let expression = format!("{}1{}{}", "(".repeat(depth), ")".repeat(depth), "+1".repeat(terms));
    let mut engine = loaded(&expression);
    assert_eq!(engine.evaluate(), Ok(1.0 + terms as f64));
}

#[test]
fn variables_reject_non_letters() {
    assert_eq!(Variable::new('1'), Err(EvalError::InvalidVariableName { name: '1' }));
    assert_eq!(Variable::new('_').unwrap_err().kind(), ErrorKind::InvalidVariableName);
}

#[test]
fn variable_values_parse_and_clear() {
    let mut variable = Variable::new('q').unwrap();
    variable.parse_value(" 2.5 ").unwrap();
    assert!(variable.is_set());
    assert_eq!(variable.value(), 2.5);

    assert!(variable.parse_value("abc").is_err());
    assert_eq!(variable.value(), 2.5);

    variable.clear();
    assert!(!variable.is_set());
    assert_eq!(variable.value(), 0.0);
}

#[test]
fn every_error_kind_has_a_description() {
    let kinds = [ErrorKind::Ok,
                 ErrorKind::EmptyExpression,
                 ErrorKind::InvalidVariableName,
                 ErrorKind::VariableNameTooLong,
                 ErrorKind::UnmatchedBraces,
                 ErrorKind::DivideByZero,
                 ErrorKind::UnknownOperator,
                 ErrorKind::OperandExpected,
                 ErrorKind::EvaluationFailed,
                 ErrorKind::OperatorExpected,
                 ErrorKind::TooManyOperators,
                 ErrorKind::TooManyOperands,
                 ErrorKind::MalformedLiteral,
                 ErrorKind::OutOfMemory];
    for kind in kinds {
        assert!(!kind.description().is_empty());
        assert_eq!(kind.to_string(), kind.description());
    }
    assert!(!ErrorKind::Ok.is_error());
}
