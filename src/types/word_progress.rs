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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::timestamp::Timestamp;

/// The ease factor every word starts with.
pub const INITIAL_EASE: f64 = 2.5;

/// The ease factor never drops below this.
pub const MIN_EASE: f64 = 1.3;

/// A word whose interval reaches this many days counts as mastered.
pub const MASTERY_INTERVAL_DAYS: usize = 21;

/// Review history for one word.
#[derive(Clone, Debug, PartialEq)]
pub struct WordProgress {
    /// The catalog ID of the word.
    pub word_id: String,
    /// Percentage of correct answers over all reviews, in `[0, 100]`.
    pub accuracy: f64,
    /// The number of times the word has been reviewed.
    pub times_reviewed: usize,
    /// When the word was last reviewed.
    pub last_reviewed: Option<Timestamp>,
    /// When the word is due again. `None` if it was never scheduled.
    pub next_review: Option<Timestamp>,
    /// The SM-2 ease factor.
    pub ease_factor: f64,
    /// Days between the last review and the next one. Zero until the first
    /// review.
    pub interval_days: usize,
}

impl WordProgress {
    /// Progress for a word that has never been reviewed.
    pub fn new(word_id: impl Into<String>) -> Self {
        Self {
            word_id: word_id.into(),
            accuracy: 0.0,
            times_reviewed: 0,
            last_reviewed: None,
            next_review: None,
            ease_factor: INITIAL_EASE,
            interval_days: 0,
        }
    }

    pub fn mastered(&self) -> bool {
        self.interval_days >= MASTERY_INTERVAL_DAYS
    }

    /// A word is due iff it has been scheduled and the scheduled time has
    /// passed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review {
            Some(next_review) => next_review <= now,
            None => false,
        }
    }

    /// Reject values that would make the scheduler produce nonsense.
    pub fn validate(&self) -> Result<(), ProgressError> {
        if !self.ease_factor.is_finite() {
            return Err(ProgressError::NonFiniteEase(self.ease_factor));
        }
        if self.ease_factor < MIN_EASE {
            return Err(ProgressError::EaseBelowFloor(self.ease_factor));
        }
        if !(0.0..=100.0).contains(&self.accuracy) {
            return Err(ProgressError::AccuracyOutOfRange(self.accuracy));
        }
        Ok(())
    }
}

/// A word progress record that violates its invariants.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ProgressError {
    NonFiniteEase(f64),
    EaseBelowFloor(f64),
    AccuracyOutOfRange(f64),
    NegativeCount { field: &'static str, value: i64 },
    /// The next review date falls outside the representable range.
    IntervalOverflow(usize),
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressError::NonFiniteEase(ease) => {
                write!(f, "ease factor must be finite, got {ease}")
            }
            ProgressError::EaseBelowFloor(ease) => {
                write!(f, "ease factor {ease} is below the floor of {MIN_EASE}")
            }
            ProgressError::AccuracyOutOfRange(accuracy) => {
                write!(f, "accuracy {accuracy} is outside [0, 100]")
            }
            ProgressError::NegativeCount { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ProgressError::IntervalOverflow(days) => {
                write!(f, "an interval of {days} days is out of range")
            }
        }
    }
}

impl Error for ProgressError {}

/// Convert a signed database integer into a count.
pub fn to_count(field: &'static str, value: i64) -> Result<usize, ProgressError> {
    usize::try_from(value).map_err(|_| ProgressError::NegativeCount { field, value })
}
