// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Daily study streaks.

use crate::types::date::Date;
use crate::types::study_session::StudySession;
use crate::types::user_progress::UserProgress;

/// Count consecutive study days ending today or yesterday, from the full
/// session log. Only completed sessions count.
pub fn compute_streak(sessions: &[StudySession], today: Date) -> usize {
    let mut dates: Vec<Date> = sessions
        .iter()
        .filter(|s| s.completed)
        .map(|s| s.date)
        .collect();
    dates.sort_by(|a, b| b.cmp(a));
    let Some(&latest) = dates.first() else {
        return 0;
    };
    if latest != today && Some(latest) != today.previous() {
        return 0;
    }
    let mut expected = latest;
    let mut streak = 0;
    for date in dates {
        if date == expected {
            streak += 1;
            match expected.previous() {
                Some(previous) => expected = previous,
                None => break,
            }
        } else if date < expected {
            // Gap.
            break;
        }
        // Otherwise this is another session on a day already counted.
    }
    streak
}

/// The streak after completing a session today, given the stored progress.
pub fn advance_streak(progress: &UserProgress, today: Date) -> usize {
    match progress.last_study_date {
        Some(last) if last == today => progress.current_streak,
        Some(last) if Some(last) == today.previous() => progress.current_streak + 1,
        _ => 1,
    }
}

/// Whether a completed session exists for today.
pub fn has_studied_today(sessions: &[StudySession], today: Date) -> bool {
    sessions.iter().any(|s| s.completed && s.date == today)
}

/// A broken streak can be recovered if today has not been studied yet and
/// the last study day was yesterday or the day before.
pub fn can_recover_streak(last_study_date: Option<Date>, studied_today: bool, today: Date) -> bool {
    let Some(last) = last_study_date else {
        return false;
    };
    if studied_today {
        return false;
    }
    Some(last) == today.days_before(1) || Some(last) == today.days_before(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn day(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn session(date: &str) -> StudySession {
        StudySession {
            date: day(date),
            new_words_learned: 3,
            words_reviewed: 5,
            accuracy: 80.0,
            duration: 120,
            completed: true,
        }
    }

    #[test]
    fn test_no_sessions() {
        assert_eq!(compute_streak(&[], day("2025-06-10")), 0);
    }

    #[test]
    fn test_consecutive_days() {
        let sessions = vec![
            session("2025-06-08"),
            session("2025-06-10"),
            session("2025-06-09"),
        ];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 3);
    }

    #[test]
    fn test_gap_stops_the_walk() {
        let sessions = vec![session("2025-06-10"), session("2025-06-08")];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 1);
    }

    #[test]
    fn test_streak_ending_yesterday() {
        let sessions = vec![session("2025-06-09"), session("2025-06-08")];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 2);
    }

    #[test]
    fn test_broken_streak() {
        let sessions = vec![session("2025-06-08"), session("2025-06-07")];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 0);
    }

    #[test]
    fn test_multiple_sessions_per_day() {
        let sessions = vec![
            session("2025-06-10"),
            session("2025-06-10"),
            session("2025-06-09"),
            session("2025-06-09"),
            session("2025-06-08"),
        ];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 3);
    }

    #[test]
    fn test_across_month_boundary() {
        let sessions = vec![
            session("2025-03-01"),
            session("2025-02-28"),
            session("2025-02-27"),
        ];
        assert_eq!(compute_streak(&sessions, day("2025-03-01")), 3);
    }

    #[test]
    fn test_incomplete_sessions_do_not_count() {
        let mut incomplete = session("2025-06-10");
        incomplete.completed = false;
        let sessions = vec![incomplete, session("2025-06-09")];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 1);
        assert!(!has_studied_today(&sessions, day("2025-06-10")));
        assert!(has_studied_today(&sessions, day("2025-06-09")));
    }

    #[test]
    fn test_future_session_breaks_streak() {
        let sessions = vec![session("2025-06-11"), session("2025-06-10")];
        assert_eq!(compute_streak(&sessions, day("2025-06-10")), 0);
    }

    #[test]
    fn test_advance_streak() {
        let today = day("2025-06-10");
        let fresh = UserProgress::default();
        assert_eq!(advance_streak(&fresh, today), 1);
        let yesterday = UserProgress {
            current_streak: 4,
            last_study_date: Some(day("2025-06-09")),
            ..UserProgress::default()
        };
        assert_eq!(advance_streak(&yesterday, today), 5);
        let same_day = UserProgress {
            current_streak: 4,
            last_study_date: Some(today),
            ..UserProgress::default()
        };
        assert_eq!(advance_streak(&same_day, today), 4);
        let lapsed = UserProgress {
            current_streak: 4,
            last_study_date: Some(day("2025-06-07")),
            ..UserProgress::default()
        };
        assert_eq!(advance_streak(&lapsed, today), 1);
    }

    #[test]
    fn test_incremental_agrees_with_recompute() -> Fallible<()> {
        let study_days = [
            "2025-01-01",
            "2025-01-02",
            "2025-01-02",
            "2025-01-03",
            "2025-01-05",
            "2025-01-06",
            "2025-01-09",
            "2025-01-10",
            "2025-01-11",
            "2025-01-12",
        ];
        let mut sessions: Vec<StudySession> = Vec::new();
        let mut progress = UserProgress::default();
        for date in study_days {
            let today = Date::parse(date)?;
            sessions.push(session(date));
            progress.current_streak = advance_streak(&progress, today);
            progress.last_study_date = Some(today);
            assert_eq!(progress.current_streak, compute_streak(&sessions, today));
        }
        assert_eq!(progress.current_streak, 4);
        Ok(())
    }

    #[test]
    fn test_can_recover_streak() {
        let today = day("2025-06-10");
        assert!(!can_recover_streak(None, false, today));
        assert!(can_recover_streak(Some(day("2025-06-09")), false, today));
        assert!(can_recover_streak(Some(day("2025-06-08")), false, today));
        assert!(!can_recover_streak(Some(day("2025-06-07")), false, today));
        assert!(!can_recover_streak(Some(day("2025-06-09")), true, today));
    }
}
