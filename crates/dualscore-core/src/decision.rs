//! Admit/reject thresholding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary admissions outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Admitted,
    Rejected,
}

impl Decision {
    pub fn is_admitted(self) -> bool {
        self == Decision::Admitted
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Admitted => write!(f, "Admitted"),
            Decision::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Admit when `score >= cutoff`. The boundary is inclusive.
pub fn decide(score: f64, cutoff: f64) -> Decision {
    if score >= cutoff {
        Decision::Admitted
    } else {
        Decision::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_equal_to_cutoff_is_admitted() {
        assert_eq!(decide(0.82, 0.82), Decision::Admitted);
    }

    #[test]
    fn score_just_below_cutoff_is_rejected() {
        assert_eq!(decide(0.82 - 1e-9, 0.82), Decision::Rejected);
        assert_eq!(decide(0.0, 0.82), Decision::Rejected);
    }

    #[test]
    fn score_above_cutoff_is_admitted() {
        assert!(decide(1.0, 0.82).is_admitted());
    }

    #[test]
    fn decision_display() {
        assert_eq!(Decision::Admitted.to_string(), "Admitted");
        assert_eq!(Decision::Rejected.to_string(), "Rejected");
    }
}
