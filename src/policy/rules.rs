//! Policy rules and the predicates behind them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters that satisfy the symbol rule.
pub const SYMBOLS: &str = "!@#$&()-`.+,/\"";

/// One enabled composition requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyRule {
    /// At least one ASCII letter.
    Alpha,
    /// At least one ASCII digit.
    Numeric,
    /// At least one ASCII uppercase letter.
    Uppercase,
    /// At least one character from [`SYMBOLS`].
    Symbol,
    /// No two adjacent characters are identical.
    NoConsecutiveRepeat,
    /// At least this many characters.
    MinLength(usize),
}

impl PolicyRule {
    /// Evaluates this rule against `candidate`.
    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        match *self {
            PolicyRule::Alpha => candidate.chars().any(|c| c.is_ascii_alphabetic()),
            PolicyRule::Numeric => candidate.chars().any(|c| c.is_ascii_digit()),
            PolicyRule::Uppercase => candidate.chars().any(|c| c.is_ascii_uppercase()),
            PolicyRule::Symbol => candidate.chars().any(|c| SYMBOLS.contains(c)),
            PolicyRule::NoConsecutiveRepeat => {
                let chars: Vec<char> = candidate.chars().collect();
                chars.windows(2).all(|w| w[0] != w[1])
            }
            PolicyRule::MinLength(min) => candidate.chars().count() >= min,
        }
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyRule::Alpha => write!(f, "must contain a letter"),
            PolicyRule::Numeric => write!(f, "must contain a digit"),
            PolicyRule::Uppercase => write!(f, "must contain an uppercase letter"),
            PolicyRule::Symbol => write!(f, "must contain one of {SYMBOLS}"),
            PolicyRule::NoConsecutiveRepeat => write!(f, "must not repeat a character back to back"),
            PolicyRule::MinLength(min) => write!(f, "must be at least {min} characters"),
        }
    }
}

/// The set of rules a candidate secret is checked against.
///
/// Every flag defaults to off. Field names follow the option object host
/// services already send: `alpha`, `numeric`, `caps`, `symbols`,
/// `consecutive` and `minLength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyRules {
    /// Require an ASCII letter.
    pub alpha: bool,
    /// Require an ASCII digit.
    pub numeric: bool,
    /// Require an ASCII uppercase letter.
    pub caps: bool,
    /// Require a symbol from [`SYMBOLS`].
    pub symbols: bool,
    /// Forbid identical adjacent characters.
    pub consecutive: bool,
    /// Minimum character count. `None` and `Some(0)` are not checked.
    #[serde(rename = "minLength", alias = "min_length", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl PolicyRules {
    /// A policy with every rule off.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every character-class rule on, no back-to-back repeats, and at
    /// least `min_length` characters.
    pub fn strong(min_length: usize) -> Self {
        Self {
            alpha: true,
            numeric: true,
            caps: true,
            symbols: true,
            consecutive: true,
            min_length: Some(min_length),
        }
    }

    /// Requires an ASCII letter.
    pub fn with_alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    /// Requires an ASCII digit.
    pub fn with_numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Requires an ASCII uppercase letter.
    pub fn with_caps(mut self) -> Self {
        self.caps = true;
        self
    }

    /// Requires a character from [`SYMBOLS`].
    pub fn with_symbols(mut self) -> Self {
        self.symbols = true;
        self
    }

    /// Forbids identical adjacent characters.
    pub fn with_no_consecutive(mut self) -> Self {
        self.consecutive = true;
        self
    }

    /// Requires at least `min_length` characters.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Returns the enabled rules, in a fixed order.
    pub fn enabled(&self) -> Vec<PolicyRule> {
        let flags = [
            (self.alpha, PolicyRule::Alpha),
            (self.numeric, PolicyRule::Numeric),
            (self.caps, PolicyRule::Uppercase),
            (self.symbols, PolicyRule::Symbol),
            (self.consecutive, PolicyRule::NoConsecutiveRepeat),
        ];
        let mut rules: Vec<PolicyRule> = flags
            .into_iter()
            .filter_map(|(on, rule)| on.then_some(rule))
            .collect();

        match self.min_length {
            Some(min) if min > 0 => rules.push(PolicyRule::MinLength(min)),
            _ => {}
        }
        rules
    }

    /// Returns true if no rule is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(PolicyRule::Alpha.is_satisfied_by("123a"));
        assert!(!PolicyRule::Alpha.is_satisfied_by("1234!"));
        assert!(!PolicyRule::Alpha.is_satisfied_by("ñ"));

        assert!(PolicyRule::Numeric.is_satisfied_by("abc9"));
        assert!(!PolicyRule::Numeric.is_satisfied_by("abc"));

        assert!(PolicyRule::Uppercase.is_satisfied_by("abC"));
        assert!(!PolicyRule::Uppercase.is_satisfied_by("abc1"));
    }

    #[test]
    fn test_symbol_set() {
        for symbol in SYMBOLS.chars() {
            assert!(PolicyRule::Symbol.is_satisfied_by(&symbol.to_string()));
        }
        for other in ['%', '^', '*', '_', '=', '?', ' ', '~'] {
            assert!(!PolicyRule::Symbol.is_satisfied_by(&other.to_string()));
        }
    }

    #[test]
    fn test_consecutive_repeat() {
        assert!(PolicyRule::NoConsecutiveRepeat.is_satisfied_by(""));
        assert!(PolicyRule::NoConsecutiveRepeat.is_satisfied_by("a"));
        assert!(PolicyRule::NoConsecutiveRepeat.is_satisfied_by("abab"));
        assert!(!PolicyRule::NoConsecutiveRepeat.is_satisfied_by("abcc"));
        assert!(!PolicyRule::NoConsecutiveRepeat.is_satisfied_by("ééa"));
    }

    #[test]
    fn test_min_length_counts_chars() {
        assert!(PolicyRule::MinLength(3).is_satisfied_by("abc"));
        assert!(!PolicyRule::MinLength(3).is_satisfied_by("ab"));
        // Three chars, six bytes
        assert!(!PolicyRule::MinLength(4).is_satisfied_by("ééé"));
    }

    #[test]
    fn test_enabled_rules() {
        assert!(PolicyRules::none().is_empty());
        assert!(PolicyRules::none().with_min_length(0).is_empty());

        let rules = PolicyRules::none().with_numeric().with_min_length(8);
        assert_eq!(
            rules.enabled(),
            vec![PolicyRule::Numeric, PolicyRule::MinLength(8)]
        );
        assert_eq!(PolicyRules::strong(12).enabled().len(), 6);
    }

    #[test]
    fn test_host_option_keys() {
        let rules: PolicyRules =
            toml::from_str("alpha = true\ncaps = true\nminLength = 10").unwrap();
        assert_eq!(
            rules,
            PolicyRules::none().with_alpha().with_caps().with_min_length(10)
        );

        let rules: PolicyRules = toml::from_str("min_length = 4").unwrap();
        assert_eq!(rules.min_length, Some(4));
    }
}
