use std::fmt;

use super::Polygon;

/// Why a candidate grain was dropped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// The synthesizer produced no shape
    Empty,
    /// The candidate overlaps or touches the accepted grain at `index`
    Intersects { index: usize },
    /// The candidate lies closer than the minimum distance to the grain at `index`
    TooClose { index: usize, distance: f64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "empty candidate"),
            RejectReason::Intersects { index } => write!(f, "intersects grain {}", index),
            RejectReason::TooClose { index, distance } => {
                write!(f, "{:.3} from grain {}", distance, index)
            }
        }
    }
}

/// Result of a single placement attempt
#[derive(Debug, Clone)]
pub enum PlacementOutcome {
    Accepted(Polygon),
    Rejected(RejectReason),
}

impl PlacementOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PlacementOutcome::Accepted(_))
    }
}

/// Tally of placement outcomes over one generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlacementStats {
    /// Number of placements attempted (the requested polygon count)
    pub requested: usize,
    pub accepted: usize,
    pub rejected_empty: usize,
    pub rejected_intersecting: usize,
    pub rejected_too_close: usize,
}

impl PlacementStats {
    pub fn record(&mut self, outcome: &PlacementOutcome) {
        self.requested += 1;
        match outcome {
            PlacementOutcome::Accepted(_) => self.accepted += 1,
            PlacementOutcome::Rejected(RejectReason::Empty) => self.rejected_empty += 1,
            PlacementOutcome::Rejected(RejectReason::Intersects { .. }) => {
                self.rejected_intersecting += 1
            }
            PlacementOutcome::Rejected(RejectReason::TooClose { .. }) => {
                self.rejected_too_close += 1
            }
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejected_empty + self.rejected_intersecting + self.rejected_too_close
    }

    /// Fraction of attempts that were accepted
    pub fn acceptance_rate(&self) -> f64 {
        if self.requested == 0 {
            0.0
        } else {
            self.accepted as f64 / self.requested as f64
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} grains placed ({:.1}%), rejected: {} intersecting, {} too close, {} empty",
            self.accepted,
            self.requested,
            self.acceptance_rate() * 100.0,
            self.rejected_intersecting,
            self.rejected_too_close,
            self.rejected_empty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::empty_polygon;

    #[test]
    fn test_record_outcomes() {
        let mut stats = PlacementStats::default();
        stats.record(&PlacementOutcome::Accepted(empty_polygon()));
        stats.record(&PlacementOutcome::Rejected(RejectReason::Empty));
        stats.record(&PlacementOutcome::Rejected(RejectReason::Intersects { index: 0 }));
        stats.record(&PlacementOutcome::Rejected(RejectReason::TooClose {
            index: 0,
            distance: 0.5,
        }));

        assert_eq!(stats.requested, 4);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected(), 3);
        assert!((stats.acceptance_rate() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_acceptance_rate_without_attempts() {
        let stats = PlacementStats::default();
        assert_eq!(stats.acceptance_rate(), 0.0);
    }

    #[test]
    fn test_reject_reason_display() {
        let reason = RejectReason::TooClose {
            index: 3,
            distance: 1.25,
        };
        assert_eq!(reason.to_string(), "1.250 from grain 3");
    }
}
