use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which frontier discipline a search run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Breadth-first: queue frontier, shortest path in moves.
    #[default]
    Bfs,
    /// Depth-first: stack frontier, any path.
    Dfs,
    /// A*: frontier ordered by `g + h` with a Manhattan heuristic.
    AStar,
}

impl Strategy {
    /// Every strategy, in menu order.
    pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dfs, Strategy::AStar];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::AStar => "astar",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy \u{201c}{0}\u{201d} (expected bfs, dfs or astar)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn strategy_serializes_lowercase() {
        let json = serde_json::to_string(&Strategy::AStar).unwrap();
        assert_eq!(json, "\"astar\"");
        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Strategy::AStar);
    }
}
