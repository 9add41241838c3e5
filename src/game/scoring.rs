use crate::model::DifficultyTier;

/// Base points for a one-second Easy finish.
pub const SCORE_SCALE: f64 = 10_000.0;
pub const DAILY_MULTIPLIER: f64 = 1.5;

/// Score for a finish: `floor(weight * 10000 / time * daily_bonus)`.
///
/// The weight is applied before the daily multiplier. `time` is the elapsed
/// play time in seconds and must be positive; a finished game always took
/// some time, so a non-positive value is a caller bug and scores zero.
pub fn compute_score(time: f64, tier: DifficultyTier, is_daily: bool) -> u64 {
    if !(time > 0.0) {
        return 0;
    }
    let raw = f64::from(tier.weight()) * SCORE_SCALE / time;
    let multiplier = if is_daily { DAILY_MULTIPLIER } else { 1.0 };
    (raw * multiplier).floor() as u64
}
