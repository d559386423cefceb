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

//! SM-2 review scheduling.

use crate::types::review_quality::ReviewQuality;
use crate::types::timestamp::Timestamp;
use crate::types::word_progress::MIN_EASE;
use crate::types::word_progress::ProgressError;
use crate::types::word_progress::WordProgress;

/// The interval after the first successful review.
const FIRST_INTERVAL: usize = 1;

/// The interval after the second successful review.
const SECOND_INTERVAL: usize = 6;

/// The interval after a lapse.
const LAPSE_INTERVAL: usize = 1;

/// Intervals never grow past this, about a hundred years.
pub const MAX_INTERVAL_DAYS: usize = 36_500;

/// The scheduling fields produced by a review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Schedule {
    pub next_review: Timestamp,
    pub interval_days: usize,
    pub ease_factor: f64,
}

/// Compute the next schedule for a word. Does not touch `progress`.
pub fn compute_next_review(
    progress: &WordProgress,
    quality: ReviewQuality,
    now: Timestamp,
) -> Result<Schedule, ProgressError> {
    progress.validate()?;
    let ease_factor = next_ease_factor(progress.ease_factor, quality);
    let interval_days = next_interval(progress.interval_days, quality, ease_factor);
    let next_review = now
        .add_days(interval_days)
        .ok_or(ProgressError::IntervalOverflow(interval_days))?;
    Ok(Schedule {
        next_review,
        interval_days,
        ease_factor,
    })
}

/// `EF' = max(1.3, EF + 0.1 - (3 - q) * (0.08 + (3 - q) * 0.02))`.
pub fn next_ease_factor(ease_factor: f64, quality: ReviewQuality) -> f64 {
    let miss = (ReviewQuality::Easy.value() - quality.value()) as f64;
    let ease_factor = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
    ease_factor.max(MIN_EASE)
}

pub fn next_interval(previous: usize, quality: ReviewQuality, ease_factor: f64) -> usize {
    if quality < ReviewQuality::Good {
        return LAPSE_INTERVAL;
    }
    match previous {
        0 => FIRST_INTERVAL,
        1 => SECOND_INTERVAL,
        _ => {
            let grown = (previous as f64 * ease_factor).round();
            if grown >= MAX_INTERVAL_DAYS as f64 {
                MAX_INTERVAL_DAYS
            } else {
                grown as usize
            }
        }
    }
}

/// Apply a review to a word's progress, returning the updated record.
pub fn record_review(
    progress: &WordProgress,
    quality: ReviewQuality,
    now: Timestamp,
) -> Result<WordProgress, ProgressError> {
    let schedule = compute_next_review(progress, quality, now)?;
    let score = if quality.is_correct() { 100.0 } else { 0.0 };
    let count = progress.times_reviewed as f64;
    let accuracy = (progress.accuracy * count + score) / (count + 1.0);
    Ok(WordProgress {
        word_id: progress.word_id.clone(),
        accuracy,
        times_reviewed: progress.times_reviewed + 1,
        last_reviewed: Some(now),
        next_review: Some(schedule.next_review),
        ease_factor: schedule.ease_factor,
        interval_days: schedule.interval_days,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::error::Fallible;

    const ALL: [ReviewQuality; 4] = [
        ReviewQuality::Again,
        ReviewQuality::Hard,
        ReviewQuality::Good,
        ReviewQuality::Easy,
    ];

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap())
    }

    fn progress(interval_days: usize, ease_factor: f64) -> WordProgress {
        WordProgress {
            interval_days,
            ease_factor,
            ..WordProgress::new("vi-xin-chao")
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ease_deltas() {
        assert!(approx(next_ease_factor(2.5, ReviewQuality::Easy), 2.6));
        assert!(approx(next_ease_factor(2.5, ReviewQuality::Good), 2.5));
        assert!(approx(next_ease_factor(2.5, ReviewQuality::Hard), 2.36));
        assert!(approx(next_ease_factor(2.5, ReviewQuality::Again), 2.18));
    }

    #[test]
    fn test_lapse_resets_interval() -> Fallible<()> {
        for previous in [0, 1, 6, 16, 300] {
            for quality in [ReviewQuality::Again, ReviewQuality::Hard] {
                let schedule = compute_next_review(&progress(previous, 2.5), quality, now())?;
                assert_eq!(schedule.interval_days, 1);
            }
        }
        Ok(())
    }

    #[test]
    fn test_first_review() -> Fallible<()> {
        let schedule = compute_next_review(&progress(0, 2.5), ReviewQuality::Good, now())?;
        assert_eq!(schedule.interval_days, 1);
        Ok(())
    }

    #[test]
    fn test_graduation() -> Fallible<()> {
        let schedule = compute_next_review(&progress(1, 2.5), ReviewQuality::Good, now())?;
        assert_eq!(schedule.interval_days, 6);
        Ok(())
    }

    #[test]
    fn test_geometric_growth() -> Fallible<()> {
        let schedule = compute_next_review(&progress(6, 2.5), ReviewQuality::Easy, now())?;
        assert!(approx(schedule.ease_factor, 2.6));
        // 6 * 2.6 = 15.6, rounded rather than truncated.
        assert_eq!(schedule.interval_days, 16);
        Ok(())
    }

    #[test]
    fn test_ease_floor() -> Fallible<()> {
        let mut p = progress(10, 1.3);
        for _ in 0..10 {
            p = record_review(&p, ReviewQuality::Again, now())?;
            assert!(p.ease_factor >= 1.3);
        }
        assert_eq!(p.ease_factor, 1.3);
        for quality in ALL {
            let schedule = compute_next_review(&progress(3, 1.3), quality, now())?;
            assert!(schedule.ease_factor >= 1.3);
        }
        Ok(())
    }

    #[test]
    fn test_next_review_is_interval_days_later() -> Fallible<()> {
        let schedule = compute_next_review(&progress(6, 2.5), ReviewQuality::Good, now())?;
        assert_eq!(
            Some(schedule.next_review),
            now().add_days(schedule.interval_days)
        );
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Fallible<()> {
        let p = progress(6, 2.1);
        let a = compute_next_review(&p, ReviewQuality::Good, now())?;
        let b = compute_next_review(&p, ReviewQuality::Good, now())?;
        assert_eq!(a, b);
        assert_eq!(p, progress(6, 2.1));
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_progress() {
        let p = progress(6, f64::INFINITY);
        assert!(matches!(
            compute_next_review(&p, ReviewQuality::Good, now()),
            Err(ProgressError::NonFiniteEase(_))
        ));
        let p = progress(6, 0.5);
        assert_eq!(
            compute_next_review(&p, ReviewQuality::Good, now()),
            Err(ProgressError::EaseBelowFloor(0.5))
        );
    }

    #[test]
    fn test_record_review_tracks_accuracy() -> Fallible<()> {
        let p = WordProgress::new("vi-cam-on");
        let p = record_review(&p, ReviewQuality::Good, now())?;
        assert_eq!(p.times_reviewed, 1);
        assert_eq!(p.accuracy, 100.0);
        assert_eq!(p.last_reviewed, Some(now()));
        assert_eq!(p.interval_days, 1);
        let p = record_review(&p, ReviewQuality::Again, now())?;
        assert_eq!(p.times_reviewed, 2);
        assert_eq!(p.accuracy, 50.0);
        let p = record_review(&p, ReviewQuality::Easy, now())?;
        assert_eq!(p.times_reviewed, 3);
        assert!(approx(p.accuracy, 200.0 / 3.0));
        Ok(())
    }

    #[test]
    fn test_reaches_mastery() -> Fallible<()> {
        let mut p = WordProgress::new("vi-yeu");
        let mut reviews = 0;
        while !p.mastered() {
            p = record_review(&p, ReviewQuality::Good, now())?;
            reviews += 1;
        }
        // 1, 6, 15, then past the threshold.
        assert_eq!(reviews, 4);
        assert!(p.interval_days >= 21);
        Ok(())
    }

    #[test]
    fn test_huge_interval_is_capped() -> Fallible<()> {
        let p = progress(200_000_000, 2.5);
        assert!(p.validate().is_ok());
        let schedule = compute_next_review(&p, ReviewQuality::Good, now())?;
        assert_eq!(schedule.interval_days, MAX_INTERVAL_DAYS);
        let schedule = compute_next_review(&p, ReviewQuality::Again, now())?;
        assert_eq!(schedule.interval_days, 1);
        Ok(())
    }

    #[test]
    fn test_many_easy_reviews() -> Fallible<()> {
        let mut p = WordProgress::new("vi-vang");
        for _ in 0..100 {
            let previous = p.interval_days;
            p = record_review(&p, ReviewQuality::Easy, now())?;
            assert!(p.interval_days >= previous);
            assert!(p.interval_days <= MAX_INTERVAL_DAYS);
        }
        assert_eq!(p.interval_days, MAX_INTERVAL_DAYS);
        assert_eq!(p.times_reviewed, 100);
        Ok(())
    }

    #[test]
    fn test_due_date_out_of_range() {
        let far = Timestamp::new(Utc.with_ymd_and_hms(262_100, 1, 1, 12, 0, 0).unwrap());
        let p = progress(MAX_INTERVAL_DAYS, 2.5);
        assert_eq!(
            compute_next_review(&p, ReviewQuality::Good, far),
            Err(ProgressError::IntervalOverflow(MAX_INTERVAL_DAYS))
        );
    }
}
