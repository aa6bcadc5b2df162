use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use crate::time::whole_minutes_between;

/// A timed study session on one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: RecordId,
    pub route: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Whole minutes, set when the session ends.
    #[serde(default)]
    pub duration: u32,
}

impl StudySession {
    #[must_use]
    pub fn start(route: &str, title: &str, at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            route: route.to_string(),
            title: title.to_string(),
            start_time: at,
            end_time: None,
            duration: 0,
        }
    }

    #[must_use]
    pub fn finish(mut self, at: DateTime<Utc>) -> Self {
        self.end_time = Some(at);
        self.duration = whole_minutes_between(self.start_time, at);
        self
    }
}

/// Consecutive study days ending today, or yesterday if nothing was studied today.
#[must_use]
pub fn study_streak(sessions: &[StudySession], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = sessions
        .iter()
        .map(|s| s.start_time.date_naive())
        .collect();

    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn session_days_ago(days: i64) -> StudySession {
        StudySession::start("#/theory/java", "Java", fixed_now() - Duration::days(days))
    }

    #[test]
    fn finishing_records_whole_minutes() {
        let session = StudySession::start("#/quiz/sql", "SQL", fixed_now());
        let done = session.finish(fixed_now() + Duration::seconds(25 * 60 + 40));
        assert_eq!(done.duration, 26);
        assert!(done.end_time.is_some());
    }

    #[test]
    fn streak_counts_back_from_today() {
        let today = fixed_now().date_naive();
        let sessions = vec![
            session_days_ago(0),
            session_days_ago(1),
            session_days_ago(1),
            session_days_ago(2),
            session_days_ago(4),
        ];
        assert_eq!(study_streak(&sessions, today), 3);
    }

    #[test]
    fn streak_may_start_yesterday() {
        let today = fixed_now().date_naive();
        let sessions = vec![session_days_ago(1), session_days_ago(2)];
        assert_eq!(study_streak(&sessions, today), 2);
    }

    #[test]
    fn gap_before_yesterday_breaks_streak() {
        let today = fixed_now().date_naive();
        assert_eq!(study_streak(&[session_days_ago(2)], today), 0);
        assert_eq!(study_streak(&[], today), 0);
    }
}
