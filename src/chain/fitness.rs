//! Fitness values: scalar, multi-objective vector, or the invalid sentinel.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality score of an individual. Lower is better.
///
/// `Invalid` marks unevaluated individuals and failed evaluations; it orders
/// strictly worse than any valid value, so sentinel-carrying individuals
/// lose every comparison and drain out of selection over time.
///
/// Construct values through [`Fitness::single`] and [`Fitness::multi`],
/// which collapse non-finite inputs to `Invalid` and keep valid values
/// totally comparable within one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fitness {
    /// Not evaluated yet, or the evaluation failed.
    Invalid,
    /// Single-objective value.
    Single(f64),
    /// Multi-objective vector, minimised componentwise.
    Multi(Vec<f64>),
}

impl Fitness {
    /// Scalar fitness; non-finite values collapse to `Invalid`.
    pub fn single(value: f64) -> Self {
        if value.is_finite() {
            Fitness::Single(value)
        } else {
            Fitness::Invalid
        }
    }

    /// Vector fitness; empty or partly non-finite vectors collapse to
    /// `Invalid`.
    pub fn multi(values: Vec<f64>) -> Self {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            Fitness::Invalid
        } else {
            Fitness::Multi(values)
        }
    }

    /// Whether this is a usable, comparable value.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Fitness::Invalid)
    }

    /// Objective values as a slice; `None` for `Invalid`.
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Fitness::Invalid => None,
            Fitness::Single(value) => Some(std::slice::from_ref(value)),
            Fitness::Multi(values) => Some(values),
        }
    }

    /// Number of objectives; `None` for `Invalid`.
    pub fn objective_count(&self) -> Option<usize> {
        self.values().map(<[f64]>::len)
    }

    /// Whether `self` Pareto-dominates `other`: no worse in every objective
    /// and strictly better in at least one. `Invalid` values and mismatched
    /// objective counts never dominate.
    pub fn dominates(&self, other: &Fitness) -> bool {
        let (Some(a), Some(b)) = (self.values(), other.values()) else {
            return false;
        };
        if a.len() != b.len() {
            return false;
        }
        let mut strictly_better = false;
        for (x, y) in a.iter().zip(b) {
            if x > y {
                return false;
            }
            if x < y {
                strictly_better = true;
            }
        }
        strictly_better
    }
}

impl PartialOrd for Fitness {
    /// Ranking order: lower is better, `Invalid` is worse than any valid
    /// value, and vectors compare lexicographically. Mismatched objective
    /// counts are incomparable and yield `None`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.values(), other.values()) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Greater),
            (Some(_), None) => Some(Ordering::Less),
            (Some(a), Some(b)) => {
                if a.len() != b.len() {
                    return None;
                }
                for (x, y) in a.iter().zip(b) {
                    match x.partial_cmp(y) {
                        Some(Ordering::Equal) => continue,
                        ord => return ord,
                    }
                }
                Some(Ordering::Equal)
            }
        }
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fitness::Invalid => write!(f, "invalid"),
            Fitness::Single(value) => write!(f, "{value}"),
            Fitness::Multi(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_collapse_non_finite() {
        assert_eq!(Fitness::single(f64::NAN), Fitness::Invalid);
        assert_eq!(Fitness::single(f64::INFINITY), Fitness::Invalid);
        assert_eq!(Fitness::multi(vec![0.1, f64::NAN]), Fitness::Invalid);
        assert_eq!(Fitness::multi(Vec::new()), Fitness::Invalid);
        assert_eq!(Fitness::single(0.5), Fitness::Single(0.5));
    }

    #[test]
    fn lower_is_better() {
        assert!(Fitness::single(0.1) < Fitness::single(0.2));
        assert!(Fitness::single(0.2) > Fitness::single(0.1));
        assert_eq!(
            Fitness::single(0.3).partial_cmp(&Fitness::single(0.3)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn invalid_orders_worst() {
        assert!(Fitness::Invalid > Fitness::single(1e9));
        assert!(Fitness::single(1e9) < Fitness::Invalid);
        assert_eq!(
            Fitness::Invalid.partial_cmp(&Fitness::Invalid),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn vectors_compare_lexicographically() {
        assert!(Fitness::multi(vec![0.1, 0.9]) < Fitness::multi(vec![0.2, 0.1]));
        assert!(Fitness::multi(vec![0.1, 0.2]) < Fitness::multi(vec![0.1, 0.3]));
        assert_eq!(
            Fitness::multi(vec![0.1, 0.2]).partial_cmp(&Fitness::multi(vec![0.1, 0.2])),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn mismatched_arity_is_incomparable() {
        let a = Fitness::multi(vec![0.1, 0.2]);
        let b = Fitness::multi(vec![0.1, 0.2, 0.3]);
        assert_eq!(a.partial_cmp(&b), None);
        let c = Fitness::single(0.1);
        assert_eq!(c.partial_cmp(&a), None);
    }

    #[test]
    fn dominance() {
        let a = Fitness::multi(vec![0.1, 0.2]);
        let b = Fitness::multi(vec![0.2, 0.3]);
        let c = Fitness::multi(vec![0.05, 0.4]);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
        assert!(!a.dominates(&a));
        assert!(!Fitness::Invalid.dominates(&b));
        assert!(!a.dominates(&Fitness::Invalid));
    }

    #[test]
    fn display_formats() {
        assert_eq!(Fitness::single(0.5).to_string(), "0.5");
        assert_eq!(Fitness::multi(vec![0.5, 1.0]).to_string(), "[0.5, 1]");
        assert_eq!(Fitness::Invalid.to_string(), "invalid");
    }
}
