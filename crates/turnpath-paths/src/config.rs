use turnpath_core::Direction;

/// Cost of one forward step.
pub const STEP_COST: u64 = 1;

/// Extra cost charged each time the facing changes.
pub const TURN_PENALTY: u64 = 1000;

/// Tunables for building and solving a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Added to [`STEP_COST`] for every step whose direction differs from
    /// the current facing.
    pub turn_penalty: u64,
    /// Facing at the start cell.
    pub start_facing: Direction,
    /// Upper bound on relaxation sweeps. `None` derives the bound from the
    /// size of the compressed graph.
    pub max_sweeps: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            turn_penalty: TURN_PENALTY,
            start_facing: Direction::East,
            max_sweeps: None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SolverConfig = serde_json::from_str(r#"{"turn_penalty": 5}"#).unwrap();
        assert_eq!(cfg.turn_penalty, 5);
        assert_eq!(cfg.start_facing, Direction::East);
        assert_eq!(cfg.max_sweeps, None);
    }

    #[test]
    fn config_round_trip() {
        let cfg = SolverConfig {
            turn_penalty: 7,
            start_facing: Direction::North,
            max_sweeps: Some(12),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
