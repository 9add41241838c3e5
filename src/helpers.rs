use chrono::{DateTime, Local};

use crate::model::{LeaderboardRecord, Medal};

/// Elapsed seconds with one decimal, e.g. `12.3s`. Display only.
pub fn format_elapsed(secs: f64) -> String {
    format!("{:.1}s", secs)
}

pub fn format_timer(secs: f64) -> String {
    format!("Time: {}", format_elapsed(secs))
}

/// One leaderboard line: position or crown, nickname, tier, time and comment.
pub fn format_leaderboard_row(position: usize, record: &LeaderboardRecord) -> String {
    let marker = match Medal::for_position(position) {
        Some(Medal::Gold) => "♛ gold  ".to_string(),
        Some(Medal::Silver) => "♛ silver".to_string(),
        Some(Medal::Bronze) => "♛ bronze".to_string(),
        None => format!("{:>8}", position),
    };
    let today = if record.is_today { " [TODAY]" } else { "" };
    let saved_at: DateTime<Local> = record.timestamp.into();
    let mut row = format!(
        "{} {} {} | {}{} | {} | {} pts | {}",
        marker,
        record.country,
        record.nickname,
        record.difficulty,
        today,
        format_elapsed(record.time),
        record.score,
        saved_at.format("%Y-%m-%d %H:%M"),
    );
    if !record.comment.is_empty() {
        row.push_str(" | ");
        row.push_str(&record.comment);
    }
    row
}
