//! Seasonal calendar helpers for outbreak risk.
//!
//! Weeks live on a 52-week cycle; ISO week 53 folds onto week 1 so the turn of the year stays
//! contiguous.

use crate::assessments::config::RiskWindow;

pub const CYCLE_WEEKS: u8 = 52;

/// Weeks with elevated seasonal transmission, in calendar order.
pub const WINTER_WEEKS: [u8; 18] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 45, 46, 47, 48, 49, 50, 51, 52];

pub fn cycle_week(week: u8) -> u8 {
    if week > CYCLE_WEEKS {
        1
    } else {
        week
    }
}

pub fn is_winter_week(week: u8) -> bool {
    WINTER_WEEKS.contains(&cycle_week(week))
}

/// Distance between two weeks going whichever way round the year is shorter.
pub fn circular_distance(a: u8, b: u8) -> u8 {
    let forward = cycle_week(a).abs_diff(cycle_week(b));
    forward.min(CYCLE_WEEKS - forward)
}

/// Winter weeks around `target`, nearest first with ties to the smaller week number.
///
/// The target week itself is not reported.
pub fn rank_high_risk_weeks(target: u8, window: &RiskWindow) -> Vec<u8> {
    let target = cycle_week(target);
    let mut ranked: Vec<(u8, u8)> = WINTER_WEEKS
        .iter()
        .copied()
        .filter(|week| *week != target)
        .map(|week| (circular_distance(week, target), week))
        .filter(|(distance, _)| *distance <= window.radius)
        .collect();
    ranked.sort_unstable();
    ranked
        .into_iter()
        .take(window.limit)
        .map(|(_, week)| week)
        .collect()
}
