//! End-to-end tests of the minimization pipeline

use boolmin::efmt::SopFormatted;
use boolmin::*;
use proptest::prelude::*;

/// Check that the minimized function agrees with the original expression on every row
fn check_equivalent(minimized: &Minimized) -> Result<(), BoolminError> {
    for (state, value) in minimized.table().rows() {
        assert_eq!(
            minimized.function().eval(state)?,
            value,
            "{} differs in state {}",
            minimized,
            state
        );
    }
    Ok(())
}

/// Render each term of the minimized function separately, sorted
fn terms(minimized: &Minimized) -> Vec<String> {
    let mut terms: Vec<String> = minimized
        .function()
        .iter()
        .map(|p| SopFormatted(p, Some(minimized.variables())).to_string())
        .collect();
    terms.sort();
    terms
}

#[test]
fn excluded_middle() -> Result<(), BoolminError> {
    let minimized = minimize("A + !A")?;
    assert_eq!(minimized.function().len(), 1);
    assert_eq!(minimized.function().literal_count(), 0);
    assert_eq!(format!("{}", minimized), "F = 1");
    Ok(())
}

#[test]
fn simple_function() -> Result<(), BoolminError> {
    let minimized = minimize("(A.B)+C")?;

    let mut primes: Vec<String> = minimized
        .primes()
        .iter()
        .map(|p| p.with_width(3).to_string())
        .collect();
    primes.sort();
    assert_eq!(primes, ["--1", "11-"]);

    assert_eq!(terms(&minimized), ["AB", "C"]);
    check_equivalent(&minimized)
}

#[test]
fn constant_operand() -> Result<(), BoolminError> {
    let minimized = minimize("!(((A+B).C).0)")?;

    let state = minimized.variables().state([("A", false), ("B", true), ("C", true)])?;
    assert!(minimized.expression().eval(&state)?);
    assert!(minimized.table().results().iter().all(|v| *v));

    assert_eq!(minimized.function().len(), 1);
    assert!(minimized.function().iter().all(Pattern::is_free_pattern));
    assert_eq!(format!("{}", minimized), "F = 1");
    Ok(())
}

#[test]
fn contradiction() {
    let result = minimize("A.!A");
    assert_eq!(result.as_ref().err(), Some(&BoolminError::NoSatisfyingAssignment));
    assert_eq!(render_result(&result), "no solution");

    let result = minimize("0");
    assert_eq!(render_result(&result), "no solution");
}

#[test]
fn invalid_input() {
    let result = minimize("A . (B + C");
    assert!(matches!(result, Err(BoolminError::Syntax { .. })));
    assert!(render_result(&result).starts_with("Syntax error"));

    let many = (b'A'..=b'U')
        .map(|c| (c as char).to_string())
        .collect::<Vec<_>>()
        .join(" + ");
    assert_eq!(
        minimize(&many).err(),
        Some(BoolminError::TooManyVariables { count: 21, max: 20 })
    );
}

#[test]
fn round_trip() -> Result<(), BoolminError> {
    for text in [
        "A . B + A . !B",
        "(A + B) . (A + C)",
        "!(A . B) + !(C + D)",
        "A . !B . C + !A . B . !C + A . B . C + !A . !B . !C",
        "not first and second or first and not second",
        "(A ^ B) v (C & !D) v -(A | D)",
        "A . B . C . D + A . !B . C . !D + !A . B . !C . D",
    ] {
        let minimized = minimize(text)?;
        check_equivalent(&minimized)?;
        let bound = minimized.table().minterms().count() * minimized.variables().len();
        assert!(minimized.function().literal_count() <= bound);
    }
    Ok(())
}

#[test]
fn idempotence() -> Result<(), BoolminError> {
    for text in [
        "(A . B) + C",
        "A . !B + !A . B",
        "A + B . C + !D",
        "!A . !B . !C . !D + A . B . C . D",
    ] {
        let first = minimize(text)?;
        let rendered = first.variables().named(first.function()).to_string();
        let second = minimize(&rendered)?;
        assert_eq!(
            first.function().literal_count(),
            second.function().literal_count(),
            "{} -> {}",
            text,
            rendered
        );
        assert_eq!(first.function().len(), second.function().len());
        assert_eq!(format!("{}", first), format!("{}", second));
    }
    Ok(())
}

#[test]
fn essentials_are_kept() -> Result<(), BoolminError> {
    // a cyclic part (B, C, D) next to an essential term (A . !B . !C . !D)
    let text = "A . !B . !C . !D + !B . !C . D + !B . C . !D + B . !C . !D + B . C . D";
    let minimized = minimize(text)?;
    for p in minimized.essentials() {
        assert!(minimized.function().has_term(p));
    }
    check_equivalent(&minimized)?;

    let minimized = minimize("A . B + !A . C + B . C")?;
    assert_eq!(terms(&minimized), ["A'C", "AB"]);
    assert_eq!(minimized.essentials().len(), 2);
    Ok(())
}

#[test]
fn deterministic() -> Result<(), BoolminError> {
    let text = "A . !B . C + !A . B . !C + A . B . C + !A . !B . !C + D";
    let first = format!("{}", minimize(text)?);
    for _ in 0..5 {
        assert_eq!(format!("{}", minimize(text)?), first);
    }
    Ok(())
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["A", "B", "C", "D", "0", "1"]).prop_map(String::from);
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| format!("!({})", e)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({} . {})", a, b)),
            (inner.clone(), inner).prop_map(|(a, b)| format!("({} + {})", a, b)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn minimized_function_is_equivalent(text in expression()) {
        match minimize(&text) {
            Ok(minimized) => {
                for (state, value) in minimized.table().rows() {
                    prop_assert_eq!(minimized.function().eval(state).unwrap(), value);
                }
                for p in minimized.essentials() {
                    prop_assert!(minimized.function().has_term(p));
                }
                let literals: usize = minimized.primes().iter().map(Pattern::literal_count).sum();
                prop_assert!(minimized.function().literal_count() <= literals);
            }
            Err(BoolminError::NoSatisfyingAssignment) => {
                let parsed = parse_expression(&text).unwrap();
                let table = TruthTable::generate(parsed.expr(), parsed.variables()).unwrap();
                prop_assert!(table.results().iter().all(|v| !*v));
            }
            Err(e) => prop_assert!(false, "unexpected error {} for {}", e, text),
        }
    }
}
