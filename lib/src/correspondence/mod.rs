//! Vertex correspondence checks between two vertex sets.
//!
//! After tetrahedralization the combined volume should still contain
//! every vertex of each input surface. [`find_missing`] reports target
//! vertices with no exact counterpart in a reference set, and
//! [`match_within_tolerance`] pairs those gaps with their nearest
//! reference vertex under a caller-supplied threshold. Gaps are
//! reported, never repaired.

use crate::geometry::Point3;
use crate::Coord;
use std::fmt;

/// Default distance threshold for tolerance matching.
pub const DEFAULT_MATCH_THRESHOLD: Coord = 1.0;

/// Collect the target vertices that have no exact counterpart in `reference`.
///
/// Comparison is exact component-wise equality: coordinates that survive
/// a write/read round trip unchanged will match, anything else will not.
pub fn find_missing(target: &[Point3], reference: &[Point3]) -> Vec<Point3> {
    target
        .iter()
        .filter(|t| !reference.contains(*t))
        .copied()
        .collect()
}

/// Greedily pair each missing vertex with its nearest reference vertex
/// strictly closer than `threshold`.
///
/// The acceptance bound starts at `threshold` and tightens to the best
/// distance seen so far, so ties keep the first candidate encountered.
/// Vertices with no reference vertex under the bound are omitted from
/// the result; the two returned vectors stay aligned with each other,
/// not with the input.
pub fn match_within_tolerance(
    missing: &[Point3],
    reference: &[Point3],
    threshold: Coord,
) -> (Vec<Point3>, Vec<Coord>) {
    let mut matches = Vec::new();
    let mut distances = Vec::new();

    for m in missing {
        let mut best: Option<Point3> = None;
        let mut bound = threshold;
        for r in reference {
            let dist = m.distance(r);
            if dist < bound {
                best = Some(*r);
                bound = dist;
            }
        }
        if let Some(point) = best {
            matches.push(point);
            distances.push(bound);
        }
    }

    (matches, distances)
}

/// Outcome of a full correspondence check between two vertex sets.
#[derive(Debug, Clone, Default)]
pub struct CorrespondenceReport {
    /// Target vertices with no exact counterpart in the reference set.
    pub missing: Vec<Point3>,
    /// Reference vertices matched to missing targets, aligned with
    /// `distances`.
    pub matches: Vec<Point3>,
    /// Distance of each match.
    pub distances: Vec<Coord>,
    /// Matched reference vertices that are genuinely displaced, i.e. do
    /// not themselves occur exactly anywhere in the target set.
    pub near_misses: Vec<Point3>,
    /// Threshold used for tolerance matching.
    pub threshold: Coord,
}

impl CorrespondenceReport {
    /// Run the full check of `target` against `reference`.
    ///
    /// A vertex without any match is a reportable outcome, not an error;
    /// callers decide what an acceptable report looks like.
    pub fn compare(target: &[Point3], reference: &[Point3], threshold: Coord) -> Self {
        let missing = find_missing(target, reference);
        let (matches, distances) = match_within_tolerance(&missing, reference, threshold);
        let near_misses = find_missing(&matches, target);
        Self {
            missing,
            matches,
            distances,
            near_misses,
            threshold,
        }
    }

    /// True when every target vertex occurs exactly in the reference set.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty()
    }

    /// Number of missing vertices that found no match within the threshold.
    #[inline]
    pub fn unmatched_count(&self) -> usize {
        self.missing.len() - self.matches.len()
    }
}

impl fmt::Display for CorrespondenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing, {} matched within {}, {} near misses, {} unmatched",
            self.missing.len(),
            self.matches.len(),
            self.threshold,
            self.near_misses.len(),
            self.unmatched_count()
        )
    }
}
