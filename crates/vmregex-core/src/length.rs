use serde::{Deserialize, Serialize};

/// Bounds on the number of chars a fragment can consume. `max: None` is
/// unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLength {
    pub min: usize,
    pub max: Option<usize>,
}

impl Default for MatchLength {
    fn default() -> Self {
        Self::ZERO
    }
}

impl MatchLength {
    pub const ZERO: Self = Self::exact(0);

    /// Nothing is known: any length may match.
    pub const UNKNOWN: Self = Self { min: 0, max: None };

    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// Sequence: `self` followed by `next`.
    pub fn then(self, next: Self) -> Self {
        Self {
            min: self.min.saturating_add(next.min),
            max: match (self.max, next.max) {
                (Some(a), Some(b)) => a.checked_add(b),
                _ => None,
            },
        }
    }

    /// Alternation: either `self` or `other`.
    pub fn either(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.max(b)),
                _ => None,
            },
        }
    }

    pub fn repeat(self, min: u32, max: Option<u32>) -> Self {
        let lo = self.min.saturating_mul(min as usize);
        let hi = match (self.max, max) {
            (Some(0), _) => Some(0),
            (Some(a), Some(n)) => a.checked_mul(n as usize),
            _ => None,
        };
        Self { min: lo, max: hi }
    }

    /// Keeps the minimum, drops the upper bound.
    pub fn unbounded(self) -> Self {
        Self { min: self.min, max: None }
    }

    pub fn is_bounded(&self) -> bool {
        self.max.is_some()
    }
}
