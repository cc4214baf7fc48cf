// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Predicates that suppress individual ticks or labels.

use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt as _;

const EPSILON: f64 = 1e-9;

/// A single suppression rule, evaluated against a tick's value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkipRule {
    /// Skip the value equal to this one.
    Exact(f64),
    /// Skip values that are a multiple of this one.
    Modulo(f64),
    /// Skip values that are *not* a multiple of this one.
    NotModulo(f64),
    /// Skip values strictly below this one.
    Below(f64),
    /// Skip values strictly above this one.
    Above(f64),
}

impl SkipRule {
    /// Returns `true` if `value` is suppressed by this rule.
    pub fn skips(self, value: f64) -> bool {
        match self {
            Self::Exact(x) => approx_eq(value, x),
            Self::Modulo(m) => is_multiple(value, m),
            Self::NotModulo(m) => !is_multiple(value, m),
            Self::Below(x) => value < x && !approx_eq(value, x),
            Self::Above(x) => value > x && !approx_eq(value, x),
        }
    }

    /// Returns `true` if the rule is well formed (finite, non-zero modulus).
    pub fn is_valid(self) -> bool {
        match self {
            Self::Exact(x) | Self::Below(x) | Self::Above(x) => x.is_finite(),
            Self::Modulo(m) | Self::NotModulo(m) => m.is_finite() && m != 0.0,
        }
    }
}

/// A conjunction of [`SkipRule`]s: a value is admitted only if no rule skips it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkipRules(SmallVec<[SkipRule; 4]>);

impl SkipRules {
    /// An empty rule set that admits everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    pub fn with(mut self, rule: SkipRule) -> Self {
        self.0.push(rule);
        self
    }

    /// Returns `true` if no rule skips `value`.
    pub fn admits(&self, value: f64) -> bool {
        self.0.iter().all(|rule| !rule.skips(value))
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the rules in insertion order.
    pub fn rules(&self) -> &[SkipRule] {
        &self.0
    }
}

impl FromIterator<SkipRule> for SkipRules {
    fn from_iter<T: IntoIterator<Item = SkipRule>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[SkipRule; N]> for SkipRules {
    fn from(rules: [SkipRule; N]) -> Self {
        rules.into_iter().collect()
    }
}

fn tolerance(a: f64, b: f64) -> f64 {
    EPSILON * 1_f64.max(a.abs()).max(b.abs())
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= tolerance(a, b)
}

fn is_multiple(value: f64, modulus: f64) -> bool {
    if modulus == 0.0 || !modulus.is_finite() {
        return false;
    }
    let q = value / modulus;
    (q - q.round()).abs() <= tolerance(q, 0.0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn exact_matches_within_tolerance() {
        assert!(SkipRule::Exact(30.0).skips(30.0));
        assert!(SkipRule::Exact(30.0).skips(10.0 * 3.0000000000001));
        assert!(!SkipRule::Exact(30.0).skips(31.0));
    }

    #[test]
    fn modulo_handles_fractional_steps() {
        // 0.1 * 3 is not exactly 0.3 in binary.
        assert!(SkipRule::Modulo(0.1).skips(0.1 * 3.0));
        assert!(SkipRule::Modulo(5.0).skips(-15.0));
        assert!(!SkipRule::Modulo(5.0).skips(12.5));
        assert!(SkipRule::NotModulo(20.0).skips(10.0));
        assert!(!SkipRule::NotModulo(20.0).skips(140.0));
    }

    #[test]
    fn bounds_are_strict() {
        assert!(SkipRule::Below(2.0).skips(1.0));
        assert!(!SkipRule::Below(2.0).skips(2.0));
        assert!(SkipRule::Above(2.0).skips(3.0));
        assert!(!SkipRule::Above(2.0).skips(2.0));
    }

    #[test]
    fn rule_set_is_a_conjunction() {
        let rules = SkipRules::from([
            SkipRule::Exact(0.0),
            SkipRule::Exact(30.0),
            SkipRule::Modulo(5.0),
        ]);
        let admitted: std::vec::Vec<f64> = (0..=12)
            .map(|i| f64::from(i) * 2.5)
            .filter(|v| rules.admits(*v))
            .collect();
        assert_eq!(admitted, [2.5, 7.5, 12.5, 17.5, 22.5, 27.5]);
        assert!(SkipRules::new().admits(f64::MAX));
    }

    #[test]
    fn zero_modulus_is_invalid() {
        assert!(!SkipRule::Modulo(0.0).is_valid());
        assert!(!SkipRule::NotModulo(f64::NAN).is_valid());
        assert!(SkipRule::Below(-1.0).is_valid());
    }
}
