//! Dashboard projection: counts, urgent deadlines and recent papers.

use crate::model::date::{days_until_on, parse_date};
use crate::model::paper::Paper;
use chrono::{Duration, Local, NaiveDateTime};

/// Deadlines at most this many days away count as urgent.
pub const URGENT_WITHIN_DAYS: i64 = 3;
pub const DUE_WINDOW_DAYS: i64 = 7;
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgentPaper<'a> {
    pub paper: &'a Paper,
    pub days_left: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard<'a> {
    /// Papers not yet submitted.
    pub active_count: usize,
    /// Active papers whose deadline falls between now and a week from now.
    pub due_this_week: usize,
    /// Active papers due in 0..=3 days, earliest deadline first.
    pub urgent: Vec<UrgentPaper<'a>>,
    /// Last added papers, newest first.
    pub recent: Vec<&'a Paper>,
}

/// Builds the dashboard relative to the current local time.
pub fn dashboard(papers: &[Paper]) -> Dashboard<'_> {
    dashboard_at(papers, Local::now().naive_local())
}

/// Builds the dashboard relative to `now` (local wall-clock time).
pub fn dashboard_at(papers: &[Paper], now: NaiveDateTime) -> Dashboard<'_> {
    let active: Vec<&Paper> = papers.iter().filter(|paper| paper.is_active()).collect();
    let week_end = now + Duration::days(DUE_WINDOW_DAYS);

    let due_this_week = active
        .iter()
        .copied()
        .filter_map(deadline_of)
        .filter(|deadline| *deadline >= now && *deadline <= week_end)
        .count();

    let today = now.date();
    let mut urgent: Vec<(NaiveDateTime, UrgentPaper<'_>)> = active
        .iter()
        .copied()
        .filter_map(|paper| {
            let deadline = deadline_of(paper)?;
            let days_left = days_until_on(paper.deadline.as_deref(), today)?;
            (0..=URGENT_WITHIN_DAYS)
                .contains(&days_left)
                .then_some((deadline, UrgentPaper { paper, days_left }))
        })
        .collect();
    urgent.sort_by_key(|(deadline, _)| *deadline);

    Dashboard {
        active_count: active.len(),
        due_this_week,
        urgent: urgent.into_iter().map(|(_, item)| item).collect(),
        recent: papers.iter().rev().take(RECENT_LIMIT).collect(),
    }
}

fn deadline_of(paper: &Paper) -> Option<NaiveDateTime> {
    parse_date(paper.deadline.as_deref()?).map(|parsed| parsed.to_local_naive())
}
