//! Display helpers shared by the CLI tables and any other presentation layer.

pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// `W-L`, or `W-L-T` when the team has ties.
pub fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    if ties > 0 {
        format!("{wins}-{losses}-{ties}")
    } else {
        format!("{wins}-{losses}")
    }
}

/// Win percentage in `0..=100`, counting a tie as half a win.
pub fn win_percentage(wins: u32, losses: u32, ties: u32) -> f64 {
    let total = wins + losses + ties;
    if total == 0 {
        return 0.0;
    }
    (f64::from(wins) + f64::from(ties) * 0.5) / f64::from(total) * 100.0
}

/// Ordinal suffix for a rank: 1st, 2nd, 3rd, 4th, 11th, 21st.
pub fn rank_suffix(rank: usize) -> &'static str {
    if (11..=13).contains(&(rank % 100)) {
        return "th";
    }
    match rank % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
