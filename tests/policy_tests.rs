// tests/policy_tests.rs
//
// Policy tables: loading, resolution and the checks they drive.

use facets_sql::{
    CompileError, Compiler, ConfigError, Context, Options, Policies, Policy, PolicyMap, Standard,
    Term, TermKind, Terms, Value, ValueType, available_policies, load_policies, resolve_policy,
    validate_policies,
};
use serde_json::json;

fn enabled(pairs: Vec<(&str, Standard)>) -> Policies {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_named_and_inline() {
    let config = json!({
        "name": "string",
        "age": { "type": "number", "operators": ["=", ">", "<"], "term": "operator" },
        "tag": { "type": "string", "operators": ["="], "term": "like" }
    });

    let policies = load_policies(&config.to_string(), &available_policies()).unwrap();
    assert_eq!(policies.len(), 3);
    assert_eq!(policies["name"], Standard::from("string"));
    assert_eq!(
        policies["age"],
        Standard::from(Policy::new(ValueType::Number, ["=", ">", "<"], TermKind::Operator))
    );
    assert_eq!(
        policies["tag"],
        Standard::from(Policy::new(ValueType::String, ["="], TermKind::Like))
    );
}

#[test]
fn test_term_defaults_to_operator() {
    let config = json!({ "age": { "type": "number", "operators": [">"] } });
    let policies = load_policies(&config.to_string(), &available_policies()).unwrap();
    match &policies["age"] {
        Standard::Policy(p) => assert_eq!(p.term, TermKind::Operator),
        other => panic!("Expected inline policy, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_unknown_named_policy() {
    let config = json!({ "dob": "timestamp" });
    match load_policies(&config.to_string(), &available_policies()) {
        Err(ConfigError::UnknownPolicy { field, name }) => {
            assert_eq!(field, "dob");
            assert_eq!(name, "timestamp");
        }
        other => panic!("Expected UnknownPolicy, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_unknown_type() {
    let config = json!({ "x": { "type": "uuid", "operators": ["="] } });
    assert!(matches!(
        load_policies(&config.to_string(), &available_policies()),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_validate_rejects_empty_operators() {
    let policies = enabled(vec![(
        "x",
        Standard::from(Policy::new(ValueType::String, Vec::<String>::new(), TermKind::Like)),
    )]);
    assert!(matches!(
        validate_policies(&policies, &available_policies()),
        Err(ConfigError::NoOperators { .. })
    ));
}

#[test]
fn test_validate_rejects_bad_pattern() {
    let policies = enabled(vec![(
        "sku",
        Standard::from(Policy::new(ValueType::String, ["="], TermKind::Like).with_pattern("([a-z")),
    )]);
    assert!(matches!(
        validate_policies(&policies, &available_policies()),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn test_available_policies() {
    let available = available_policies();
    let number_standard = Standard::from("number");
    let number = resolve_policy(&number_standard, &available).unwrap();
    assert_eq!(number.default_operator(), Some("="));
    for op in ["=", "!=", ">", ">=", "<", "<="] {
        assert!(number.allows(op), "number should allow {}", op);
    }

    let string_standard = Standard::from("string");
    let string = resolve_policy(&string_standard, &available).unwrap();
    assert_eq!(string.term, TermKind::Like);
    assert!(resolve_policy(&Standard::from("boolean"), &available).is_some());
    assert!(resolve_policy(&Standard::from("date"), &available).is_some());
}

// ============================================================================
// Compiling against policies
// ============================================================================

#[test]
fn test_unresolved_name_is_an_invalid_field() {
    let policies = enabled(vec![("dob", Standard::from("timestamp"))]);
    assert_eq!(
        Compiler::default()
            .compile_literal(&policies, "dob:1989-07-24")
            .unwrap_err(),
        CompileError::InvalidField {
            field: "dob".to_string(),
            operator: "default".to_string(),
            value: Value::Date(chrono::NaiveDate::from_ymd_opt(1989, 7, 24).unwrap()),
        }
    );
}

#[test]
fn test_custom_named_policies() {
    let mut available = PolicyMap::new();
    available.insert(
        "ranked".to_string(),
        Policy::new(ValueType::Number, ["<"], TermKind::Operator),
    );
    let compiler = Compiler::new(Context {
        options: Options::default(),
        terms: Terms::default(),
        available,
    });

    let policies = enabled(vec![("rank", Standard::from("ranked"))]);
    assert_eq!(compiler.compile_literal(&policies, "rank:5").unwrap(), "rank < 5");

    let policies = enabled(vec![("name", Standard::from("string"))]);
    assert!(matches!(
        compiler.compile_literal(&policies, "name:x").unwrap_err(),
        CompileError::InvalidField { .. }
    ));
}

#[test]
fn test_pattern() {
    let policies = enabled(vec![(
        "sku",
        Standard::from(
            Policy::new(ValueType::String, ["="], TermKind::Operator).with_pattern("^[A-Z]{3}-[0-9]+$"),
        ),
    )]);
    let compiler = Compiler::default();

    assert_eq!(compiler.compile_literal(&policies, "sku:ABC-12").unwrap(), "sku = ABC-12");
    assert_eq!(
        compiler.compile_literal(&policies, "sku:abc").unwrap_err(),
        CompileError::PatternMismatch {
            field: "sku".to_string(),
            operator: "default".to_string(),
            value: Value::from("abc"),
            pattern: "^[A-Z]{3}-[0-9]+$".to_string(),
        }
    );
}

#[test]
fn test_type_is_checked_before_pattern() {
    let policies = enabled(vec![(
        "sku",
        Standard::from(Policy::new(ValueType::String, ["="], TermKind::Operator).with_pattern("^x$")),
    )]);
    assert!(matches!(
        Compiler::default().compile_literal(&policies, "sku:12").unwrap_err(),
        CompileError::InvalidFilterType { .. }
    ));
}

#[test]
fn test_custom_composite_builders() {
    fn both(left: Box<dyn Term>, right: Box<dyn Term>) -> Box<dyn Term> {
        facets_sql::term::or(left, right)
    }

    let compiler = Compiler::new(Context {
        terms: Terms {
            and: both,
            ..Terms::default()
        },
        ..Context::default()
    });
    let policies = enabled(vec![("age", Standard::from("number"))]);
    assert_eq!(
        compiler.compile_literal(&policies, "age:>1 age:<9").unwrap(),
        "(age > 1) OR (age < 9)"
    );
}

#[test]
fn test_compiler_is_shared_across_threads() {
    let compiler = Compiler::default();
    let policies = enabled(vec![("age", Standard::from("number"))]);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let compiler = &compiler;
                let policies = &policies;
                s.spawn(move || compiler.compile_params(policies, &format!("age:>{}", i)).unwrap())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let escaped = handle.join().unwrap();
            assert_eq!(escaped.sql, "`age` > ?");
            assert_eq!(escaped.params, vec![Value::from(i as i64)]);
        }
    });
}
