//! Candidate evaluation.

use super::{PolicyRule, PolicyRules};

/// Returns true if `candidate` satisfies every enabled rule.
///
/// With no rules enabled every candidate passes, including the empty string.
pub fn validate(candidate: &str, rules: &PolicyRules) -> bool {
    rules
        .enabled()
        .iter()
        .all(|rule| rule.is_satisfied_by(candidate))
}

/// Returns every enabled rule `candidate` fails. Empty exactly when
/// [`validate`] returns true.
pub fn violations(candidate: &str, rules: &PolicyRules) -> Vec<PolicyRule> {
    rules
        .enabled()
        .into_iter()
        .filter(|rule| !rule.is_satisfied_by(candidate))
        .collect()
}

/// A policy bound to a fixed rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyValidator {
    rules: PolicyRules,
}

impl PolicyValidator {
    /// Creates a validator for `rules`.
    pub fn new(rules: PolicyRules) -> Self {
        Self { rules }
    }

    /// Returns the rule set being enforced.
    pub fn rules(&self) -> &PolicyRules {
        &self.rules
    }

    /// See [`validate`].
    pub fn validate(&self, candidate: &str) -> bool {
        validate(candidate, &self.rules)
    }

    /// See [`violations`].
    pub fn violations(&self, candidate: &str) -> Vec<PolicyRule> {
        violations(candidate, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alpha_numeric_passes() {
        let rules = PolicyRules::none().with_alpha().with_numeric();
        assert!(validate("abc123", &rules));
    }

    #[test]
    fn test_missing_digit_fails() {
        let rules = PolicyRules::none().with_numeric();
        assert!(!validate("abcdef", &rules));
        assert_eq!(violations("abcdef", &rules), vec![PolicyRule::Numeric]);
    }

    #[test]
    fn test_adjacent_repeat_fails() {
        let rules = PolicyRules::none().with_no_consecutive();
        assert!(!validate("aabbcc", &rules));
    }

    #[test]
    fn test_full_policy_passes() {
        let rules = PolicyRules {
            alpha: true,
            numeric: true,
            caps: true,
            symbols: true,
            consecutive: false,
            min_length: Some(8),
        };
        assert!(validate("Password1!", &rules));
    }

    #[test]
    fn test_no_rules_accepts_empty() {
        assert!(validate("", &PolicyRules::none()));
    }

    #[test]
    fn test_short_candidate_fails_min_length() {
        let rules = PolicyRules::none().with_min_length(8);
        assert!(!validate("pw", &rules));
    }

    #[test]
    fn test_empty_candidate_fails_class_rules() {
        for rules in [
            PolicyRules::none().with_alpha(),
            PolicyRules::none().with_numeric(),
            PolicyRules::none().with_caps(),
            PolicyRules::none().with_symbols(),
            PolicyRules::none().with_min_length(1),
        ] {
            assert!(!validate("", &rules), "{rules:?}");
        }
        // Nothing adjacent to compare
        assert!(validate("", &PolicyRules::none().with_no_consecutive()));
    }

    #[test]
    fn test_disabled_rule_never_contributes() {
        // Would fail most rules, yet passes an empty policy.
        assert!(validate("aa", &PolicyRules::none()));

        let no_symbols = PolicyRules {
            symbols: false,
            ..PolicyRules::strong(8)
        };
        assert!(validate("Abc12345", &no_symbols));
        assert!(!validate("Abc12345", &PolicyRules::strong(8)));
    }

    #[test]
    fn test_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PolicyRules>();
        assert_send_sync::<PolicyValidator>();
    }

    #[test]
    fn test_violations_lists_every_failure() {
        let validator = PolicyValidator::new(PolicyRules::strong(10));
        assert_eq!(
            validator.violations("aab"),
            vec![
                PolicyRule::Numeric,
                PolicyRule::Uppercase,
                PolicyRule::Symbol,
                PolicyRule::NoConsecutiveRepeat,
                PolicyRule::MinLength(10),
            ]
        );
        assert!(validator.violations("Tr0ub4dor&3x").is_empty());
    }

    fn arb_rules() -> impl Strategy<Value = PolicyRules> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(0usize..16),
        )
            .prop_map(|(alpha, numeric, caps, symbols, consecutive, min_length)| PolicyRules {
                alpha,
                numeric,
                caps,
                symbols,
                consecutive,
                min_length,
            })
    }

    proptest! {
        #[test]
        fn prop_validate_is_pure(candidate in ".{0,24}", rules in arb_rules()) {
            prop_assert_eq!(validate(&candidate, &rules), validate(&candidate, &rules));
        }

        #[test]
        fn prop_violations_agree_with_validate(candidate in ".{0,24}", rules in arb_rules()) {
            prop_assert_eq!(
                violations(&candidate, &rules).is_empty(),
                validate(&candidate, &rules)
            );
        }
    }
}
