#![forbid(unsafe_code)]

//! The counter snapshot and its pure transitions.
//!
//! [`Counter`] is an immutable value: every transition returns a new
//! snapshot and leaves its input untouched. Transitions are total — they
//! are defined for every input snapshot and cannot fail — which is what
//! makes controllers independently testable without a store in the loop.

use serde::{Deserialize, Serialize};

/// One immutable snapshot of application state.
///
/// Structural equality only; there is no identity beyond the value. A new
/// snapshot replaces the old one wholesale on every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub value: i64,
}

impl Counter {
    /// Snapshot holding the given value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    /// Next snapshot with the value one higher.
    ///
    /// Saturates at `i64::MAX` to stay total.
    #[must_use]
    pub fn incremented(self) -> Self {
        Self {
            value: self.value.saturating_add(1),
        }
    }

    /// Next snapshot with the value one lower.
    ///
    /// Saturates at `i64::MIN` to stay total.
    #[must_use]
    pub fn decremented(self) -> Self {
        Self {
            value: self.value.saturating_sub(1),
        }
    }

    /// Next snapshot with the value back at zero, regardless of prior value.
    #[must_use]
    pub fn reset(self) -> Self {
        Self { value: 0 }
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_pure() {
        let five = Counter::new(5);
        assert_eq!(five.incremented(), Counter::new(6));
        assert_eq!(five.incremented(), Counter::new(6)); // Same input, same output.
        assert_eq!(five, Counter::new(5)); // Input untouched.
    }

    #[test]
    fn reset_ignores_prior_value() {
        assert_eq!(Counter::new(5).reset(), Counter::new(0));
        assert_eq!(Counter::new(-41).reset(), Counter::new(0));
        assert_eq!(Counter::new(0).reset(), Counter::new(0));
    }

    #[test]
    fn decrement_inverts_increment() {
        let c = Counter::new(7);
        assert_eq!(c.incremented().decremented(), c);
    }

    #[test]
    fn saturates_at_extremes() {
        assert_eq!(Counter::new(i64::MAX).incremented().value, i64::MAX);
        assert_eq!(Counter::new(i64::MIN).decremented().value, i64::MIN);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Counter::default(), Counter::new(0));
    }

    #[test]
    fn serde_round_trip() {
        let c = Counter::new(-3);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Counter>(&json).unwrap(), c);
    }
}
