use serde::{Deserialize, Serialize};
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Difficulty tier. Fixes the grid size, the scoring weight and how long a
/// leaderboard record stays visible.
///
/// Serialized as its numeric value (1, 2 or 3), matching the `difficultyVal`
/// field of stored leaderboard records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
}

impl Default for DifficultyTier {
    fn default() -> Self {
        DifficultyTier::Easy
    }
}

impl DifficultyTier {
    pub fn all() -> Vec<DifficultyTier> {
        vec![
            DifficultyTier::Easy,
            DifficultyTier::Normal,
            DifficultyTier::Hard,
        ]
    }

    pub fn grid_size(&self) -> usize {
        match self {
            DifficultyTier::Easy => 4,
            DifficultyTier::Normal => 6,
            DifficultyTier::Hard => 8,
        }
    }

    pub fn from_grid_size(size: usize) -> Option<DifficultyTier> {
        Self::all().into_iter().find(|tier| tier.grid_size() == size)
    }

    pub fn tile_count(&self) -> usize {
        self.grid_size() * self.grid_size()
    }

    /// Multiplier applied to the base score.
    pub fn weight(&self) -> u32 {
        match self {
            DifficultyTier::Easy => 1,
            DifficultyTier::Normal => 5,
            DifficultyTier::Hard => 15,
        }
    }

    /// Maximum age of a leaderboard record before it drops off the board.
    pub fn expiration_window(&self) -> Duration {
        match self {
            DifficultyTier::Easy | DifficultyTier::Normal => DAY,
            DifficultyTier::Hard => DAY * 5,
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            DifficultyTier::Easy => 1,
            DifficultyTier::Normal => 2,
            DifficultyTier::Hard => 3,
        }
    }

    pub fn from_value(value: u8) -> Option<DifficultyTier> {
        match value {
            1 => Some(DifficultyTier::Easy),
            2 => Some(DifficultyTier::Normal),
            3 => Some(DifficultyTier::Hard),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        let size = self.grid_size();
        format!("{} ({size}x{size} - {}pcs)", self.name(), self.tile_count())
    }

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Normal => "Normal",
            DifficultyTier::Hard => "Hard",
        }
    }

    /// Recover a tier from a stored label such as `"Hard (8x8 - 64pcs)"`.
    /// Only used for records written without a numeric value.
    pub fn from_label(label: &str) -> Option<DifficultyTier> {
        Self::all()
            .into_iter()
            .find(|tier| label.trim_start().starts_with(tier.name()))
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|tier| tier.name().to_lowercase() == lowered)
            .or_else(|| lowered.parse::<usize>().ok().and_then(Self::from_grid_size))
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

impl TryFrom<u8> for DifficultyTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| format!("invalid difficulty value: {value}"))
    }
}

impl From<DifficultyTier> for u8 {
    fn from(tier: DifficultyTier) -> u8 {
        tier.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_properties() {
        assert_eq!(DifficultyTier::Easy.grid_size(), 4);
        assert_eq!(DifficultyTier::Normal.grid_size(), 6);
        assert_eq!(DifficultyTier::Hard.grid_size(), 8);
        assert_eq!(DifficultyTier::Normal.weight(), 5);
        assert_eq!(DifficultyTier::Hard.expiration_window(), DAY * 5);
        assert_eq!(DifficultyTier::Normal.expiration_window(), DAY);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DifficultyTier::Hard.label(), "Hard (8x8 - 64pcs)");
        assert_eq!(DifficultyTier::Easy.label(), "Easy (4x4 - 16pcs)");
        for tier in DifficultyTier::all() {
            assert_eq!(DifficultyTier::from_label(&tier.label()), Some(tier));
        }
        assert_eq!(DifficultyTier::from_label("Expert"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("hard".parse::<DifficultyTier>(), Ok(DifficultyTier::Hard));
        assert_eq!("6".parse::<DifficultyTier>(), Ok(DifficultyTier::Normal));
        assert!("5".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn test_serializes_as_value() {
        assert_eq!(serde_json::to_string(&DifficultyTier::Normal).unwrap(), "2");
        let tier: DifficultyTier = serde_json::from_str("3").unwrap();
        assert_eq!(tier, DifficultyTier::Hard);
        assert!(serde_json::from_str::<DifficultyTier>("0").is_err());
    }
}
