//! Root bookkeeping.
//!
//! Candidates within the tolerance are clustered by a significance radius:
//! one record per cluster, holding the candidate with the smallest residual.
//! The number of clusters is capped by a degree heuristic.

/// A value believed to be a root, with its residual `|f(x)|`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootRecord {
    /// Root location.
    pub x: f64,
    /// `|f(x)|` at the time the record was stored.
    pub residual: f64,
}

/// What happened to a candidate offered to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootOutcome {
    /// `|f(x)|` exceeded the tolerance.
    AboveTolerance,
    /// A new cluster was opened.
    Added,
    /// The candidate replaced a worse record in its cluster.
    Improved {
        /// The record's value before replacement.
        previous: f64,
    },
    /// The cluster already holds an equal or better record.
    Kept,
    /// A new cluster would exceed the root cap.
    CapReached,
}

/// Deduplicated, bounded set of discovered roots.
///
/// # Examples
///
/// ```
/// use u_rootsolve::{RootOutcome, RootTracker};
///
/// let mut tracker = RootTracker::new(0.01, 0.1, 2);
/// assert_eq!(tracker.offer(2.001, 0.004), RootOutcome::Added);
/// assert_eq!(tracker.offer(2.0, 0.0), RootOutcome::Improved { previous: 2.001 });
/// assert_eq!(tracker.offer(5.0, 0.5), RootOutcome::AboveTolerance);
/// assert_eq!(tracker.roots(), vec![2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RootTracker {
    records: Vec<RootRecord>,
    tolerance: f64,
    significance: f64,
    max_roots: usize,
}

impl RootTracker {
    /// Creates an empty tracker.
    pub fn new(tolerance: f64, significance: f64, max_roots: usize) -> Self {
        Self {
            records: Vec::new(),
            tolerance,
            significance,
            max_roots,
        }
    }

    /// Offers a candidate `x` with objective value `fx`.
    ///
    /// Candidates with `|fx|` above the tolerance are ignored. Otherwise the
    /// first record (in insertion order) within the significance radius owns
    /// the candidate and is replaced only if the candidate's residual is
    /// strictly smaller. A candidate near no record opens a new cluster while
    /// the cap allows.
    pub fn offer(&mut self, x: f64, fx: f64) -> RootOutcome {
        let residual = fx.abs();
        if !(residual <= self.tolerance) {
            return RootOutcome::AboveTolerance;
        }

        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| (x - r.x).abs() <= self.significance)
        {
            if residual < record.residual {
                let previous = record.x;
                *record = RootRecord { x, residual };
                return RootOutcome::Improved { previous };
            }
            return RootOutcome::Kept;
        }

        if self.records.len() >= self.max_roots {
            return RootOutcome::CapReached;
        }
        if self.records.iter().any(|r| r.x == x) {
            return RootOutcome::Kept;
        }
        self.records.push(RootRecord { x, residual });
        RootOutcome::Added
    }

    /// Root locations in insertion order.
    pub fn roots(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x).collect()
    }

    /// Root records in insertion order.
    pub fn records(&self) -> &[RootRecord] {
        &self.records
    }

    /// The record with the smallest residual.
    pub fn best(&self) -> Option<&RootRecord> {
        self.records.iter().min_by(|a, b| {
            a.residual
                .partial_cmp(&b.residual)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Number of tracked roots.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no root has been found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of tracked roots.
    pub fn max_roots(&self) -> usize {
        self.max_roots
    }
}

/// Root cap derived from the highest integer exponent in an equation.
///
/// Exponents are read after `**` or `^`; `"x**3 - 2*x**2 + 1"` gives 3.
/// Text without any exponent gives 1.
///
/// This is a degree bound for polynomials only. For other expressions
/// (`"sin(x)"`, `"2**x - 3"`) it is a guess; pass an explicit cap through
/// [`SolverConfig::with_max_roots`](super::SolverConfig::with_max_roots)
/// in that case.
pub fn max_roots_from_equation(equation: &str) -> usize {
    let bytes = equation.as_bytes();
    let mut highest = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        let operator_len = if bytes[i..].starts_with(b"**") {
            2
        } else if bytes[i] == b'^' {
            1
        } else {
            0
        };
        if operator_len == 0 {
            i += 1;
            continue;
        }

        i += operator_len;
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if let Ok(exponent) = equation[start..i].parse::<usize>() {
            highest = highest.max(exponent);
        }
    }
    highest.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_added() {
        let mut tracker = RootTracker::new(0.01, 0.1, 2);
        assert!(tracker.is_empty());
        assert_eq!(tracker.offer(-2.0, 0.005), RootOutcome::Added);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let mut tracker = RootTracker::new(0.5, 0.1, 2);
        assert_eq!(tracker.offer(1.0, -0.5), RootOutcome::Added);
        assert_eq!(tracker.offer(3.0, 0.5000001), RootOutcome::AboveTolerance);
        assert_eq!(tracker.offer(4.0, f64::NAN), RootOutcome::AboveTolerance);
    }

    #[test]
    fn test_same_value_twice_is_one_root() {
        let mut tracker = RootTracker::new(0.01, 0.1, 5);
        assert_eq!(tracker.offer(2.0, 0.001), RootOutcome::Added);
        assert_eq!(tracker.offer(2.0, 0.001), RootOutcome::Kept);
        assert_eq!(tracker.offer(2.05, 0.002), RootOutcome::Kept);
        assert_eq!(tracker.roots(), vec![2.0]);
    }

    #[test]
    fn test_better_candidate_replaces_cluster() {
        let mut tracker = RootTracker::new(0.01, 0.1, 5);
        tracker.offer(2.003, 0.009);
        assert_eq!(
            tracker.offer(1.999, 0.001),
            RootOutcome::Improved { previous: 2.003 }
        );
        assert_eq!(
            tracker.records(),
            &[RootRecord {
                x: 1.999,
                residual: 0.001
            }]
        );
    }

    #[test]
    fn test_first_matching_cluster_owns_candidate() {
        let mut tracker = RootTracker::new(0.01, 0.5, 5);
        tracker.offer(1.0, 0.005);
        tracker.offer(1.8, 0.005);
        // 1.4 is within 0.5 of both; the earlier record wins.
        assert_eq!(
            tracker.offer(1.4, 0.001),
            RootOutcome::Improved { previous: 1.0 }
        );
        assert_eq!(tracker.roots(), vec![1.4, 1.8]);
    }

    #[test]
    fn test_cap_reached() {
        let mut tracker = RootTracker::new(0.01, 0.1, 2);
        tracker.offer(-2.0, 0.0);
        tracker.offer(2.0, 0.0);
        assert_eq!(tracker.offer(5.0, 0.0), RootOutcome::CapReached);
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.max_roots(), 2);
    }

    #[test]
    fn test_best() {
        let mut tracker = RootTracker::new(0.01, 0.1, 3);
        assert!(tracker.best().is_none());
        tracker.offer(-2.0, 0.004);
        tracker.offer(2.0, -0.001);
        tracker.offer(7.0, 0.002);
        assert_eq!(tracker.best().map(|r| r.x), Some(2.0));
    }

    #[test]
    fn test_huge_cap_allocates_lazily() {
        let cap = max_roots_from_equation("x**999999999999999");
        assert_eq!(cap, 999_999_999_999_999);
        let mut tracker = RootTracker::new(0.01, 0.1, cap);
        assert_eq!(tracker.offer(1.0, 0.0), RootOutcome::Added);
        assert_eq!(tracker.max_roots(), cap);

        let mut unbounded = RootTracker::new(0.01, 0.1, usize::MAX);
        assert_eq!(unbounded.offer(-1.0, 0.0), RootOutcome::Added);
    }

    #[test]
    fn test_max_roots_from_equation() {
        assert_eq!(max_roots_from_equation("x**2 - 4"), 2);
        assert_eq!(max_roots_from_equation("x**3 - 2*x**2 + 1"), 3);
        assert_eq!(max_roots_from_equation("y**2+7*y-10"), 2);
        assert_eq!(max_roots_from_equation("x^4 + x ** 12"), 12);
        assert_eq!(max_roots_from_equation("3*x - 1"), 1);
        assert_eq!(max_roots_from_equation("x**0"), 1);
        assert_eq!(max_roots_from_equation("x**"), 1);
    }
}
