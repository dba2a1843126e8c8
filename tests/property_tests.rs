//! Property-based tests for tagcheck.

use std::collections::HashMap;

use proptest::prelude::*;
use tagcheck::prelude::*;

// ============================================================================
// PARSER TOTALITY: every input parses or errors, never panics
// ============================================================================

proptest! {
    #[test]
    fn parser_is_total(tag in "[a-z0-9,=|! ]{0,40}") {
        let aliases = HashMap::new();
        let _ = tagcheck::tag::parse(&tag, &aliases);
    }

    #[test]
    fn parser_is_deterministic(tag in "[a-z0-9,=|! ]{0,40}") {
        let aliases = HashMap::new();
        let first = tagcheck::tag::parse(&tag, &aliases);
        let second = tagcheck::tag::parse(&tag, &aliases);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "parse outcome flipped between runs"),
        }
    }
}

// ============================================================================
// IDEMPOTENCE: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn struct_validation_is_idempotent(name in ".{0,12}", city in ".{0,12}") {
        let record = Record::new("User")
            .field("Name", "required,min=3", name.as_str())
            .field("City", "required", city.as_str());
        let validator = Validator::new();
        let first = validator.validate_record(&record).unwrap();
        let second = validator.validate_record(&record).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn email_rule_is_idempotent(s in ".{0,30}") {
        let validator = Validator::new();
        let first = validator.validate_value(s.as_str(), "email").unwrap();
        let second = validator.validate_value(s.as_str(), "email").unwrap();
        prop_assert_eq!(first.is_empty(), second.is_empty());
    }
}

// ============================================================================
// RULE CONSISTENCY
// ============================================================================

proptest! {
    #[test]
    fn min_matches_char_count(s in ".{0,20}", limit in 0usize..10) {
        let validator = Validator::new();
        let report = validator
            .validate_value(s.as_str(), &format!("min={limit}"))
            .unwrap();
        prop_assert_eq!(report.is_empty(), s.chars().count() >= limit);
    }

    #[test]
    fn max_matches_char_count(s in ".{0,20}", limit in 0usize..10) {
        let validator = Validator::new();
        let report = validator
            .validate_value(s.as_str(), &format!("max={limit}"))
            .unwrap();
        prop_assert_eq!(report.is_empty(), s.chars().count() <= limit);
    }

    #[test]
    fn required_matches_emptiness(s in ".{0,5}") {
        let validator = Validator::new();
        let report = validator.validate_value(s.as_str(), "required").unwrap();
        prop_assert_eq!(report.is_empty(), !s.is_empty());
    }
}

// ============================================================================
// ALTERNATION: a|b passes iff a passes or b passes
// ============================================================================

proptest! {
    #[test]
    fn alternation_passes_iff_any_alternative(s in ".{0,20}") {
        let validator = Validator::new();
        let email_ok = validator.validate_value(s.as_str(), "email").unwrap().is_empty();
        let numeric_ok = validator.validate_value(s.as_str(), "numeric").unwrap().is_empty();
        let either = validator
            .validate_value(s.as_str(), "email|numeric")
            .unwrap()
            .is_empty();
        prop_assert_eq!(either, email_ok || numeric_ok);
    }

    #[test]
    fn negation_flips_the_verdict(s in ".{0,20}") {
        let validator = Validator::new();
        let plain = validator.validate_value(s.as_str(), "numeric").unwrap().is_empty();
        let negated = validator.validate_value(s.as_str(), "!numeric").unwrap().is_empty();
        prop_assert_eq!(plain, !negated);
    }
}
