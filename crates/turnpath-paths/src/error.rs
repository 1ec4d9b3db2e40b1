use std::fmt;

use crate::state::State;

/// Failures of the search.
///
/// Apart from [`SolveError::CostOverflow`], which rejects a configuration up
/// front, these indicate a defect in graph construction, never a problem with
/// the maze itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The turn penalty is large enough that a path cost could reach the
    /// unreachable sentinel.
    CostOverflow { turn_penalty: u64 },
    /// A node on an optimal path has a finite value that no outgoing edge
    /// accounts for.
    InternalInvariantViolation { state: State, value: u64 },
    /// Relaxation did not reach a fixpoint within the sweep cap.
    IterationCapExceeded { cap: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CostOverflow { turn_penalty } => write!(
                f,
                "turn penalty {turn_penalty} is too large: path costs would overflow"
            ),
            Self::InternalInvariantViolation { state, value } => write!(
                f,
                "internal invariant violated: {state} has value {value} but no optimal edge"
            ),
            Self::IterationCapExceeded { cap } => {
                write!(f, "relaxation did not converge within {cap} sweeps")
            }
        }
    }
}

impl std::error::Error for SolveError {}
