use super::DifficultyTier;

/// Where a finished game lands on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankStatus {
    /// The leaderboard has not answered yet.
    Pending,
    Ranked(usize),
    /// The leaderboard could not be reached.
    Unranked,
}

impl RankStatus {
    pub fn position(&self) -> Option<usize> {
        match self {
            RankStatus::Ranked(position) => Some(*position),
            _ => None,
        }
    }

    pub fn medal(&self) -> Option<Medal> {
        self.position().and_then(Medal::for_position)
    }
}

/// Crown shown for the top three finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_position(position: usize) -> Option<Medal> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Medal::Gold => "#FFD700",
            Medal::Silver => "#C0C0C0",
            Medal::Bronze => "#CD7F32",
        }
    }
}

/// Result of a solved puzzle, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub elapsed_secs: f64,
    pub score: u64,
    pub tier: DifficultyTier,
    pub is_daily: bool,
    pub moves: u32,
    pub rank: RankStatus,
}
