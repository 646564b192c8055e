use serde::{Deserialize, Serialize};

/// The result of a single matchup from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Classifies a result by exact score comparison.
    pub fn from_scores(team_score: f64, opponent_score: f64) -> Self {
        if team_score > opponent_score {
            Outcome::Win
        } else if team_score < opponent_score {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }
}

/// Which side of a matchup a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}
