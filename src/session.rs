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

//! Choosing which words to study in a session.

use std::collections::HashSet;

use serde::Deserialize;

use crate::types::timestamp::Timestamp;
use crate::types::word_progress::WordProgress;

/// Default number of new words per session.
pub const DEFAULT_NEW_WORDS: usize = 10;

/// Default number of review words per session.
pub const DEFAULT_REVIEW_WORDS: usize = 20;

/// Review words placed before each new word when interleaving.
const REVIEWS_PER_NEW_WORD: usize = 2;

/// How due words are ordered. The two policies give different study orders
/// and are never mixed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    /// Highest priority score first.
    #[default]
    Weighted,
    /// Most overdue first.
    Overdue,
}

/// Tuning constants for the weighted priority score.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriorityWeights {
    /// Points per day past due.
    pub overdue_per_day: f64,
    /// Points per ten percentage points of inaccuracy.
    pub accuracy_weight: f64,
    /// Ease factors below this add to the score.
    pub ease_baseline: f64,
    /// Points per unit of ease below the baseline.
    pub ease_weight: f64,
    /// A review younger than this many days counts as recent.
    pub recent_failure_days: f64,
    /// Accuracy below this counts as failing.
    pub recent_failure_accuracy: f64,
    /// Bonus for a recently reviewed, failing word.
    pub recent_failure_bonus: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            overdue_per_day: 10.0,
            accuracy_weight: 5.0,
            ease_baseline: 2.5,
            ease_weight: 10.0,
            recent_failure_days: 2.0,
            recent_failure_accuracy: 60.0,
            recent_failure_bonus: 20.0,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct SessionOptions {
    pub ranking: Ranking,
    pub weights: PriorityWeights,
}

/// Priority score of a word for review. Higher is more urgent.
pub fn priority(progress: &WordProgress, now: Timestamp, weights: &PriorityWeights) -> f64 {
    let mut score = 0.0;
    if let Some(next_review) = progress.next_review {
        let days_overdue = now.days_since(next_review).max(0.0);
        score += days_overdue * weights.overdue_per_day;
    }
    score += (100.0 - progress.accuracy) / 10.0 * weights.accuracy_weight;
    score += ((weights.ease_baseline - progress.ease_factor) * weights.ease_weight).max(0.0);
    if let Some(last_reviewed) = progress.last_reviewed {
        let days_since_review = now.days_since(last_reviewed);
        if days_since_review < weights.recent_failure_days
            && progress.accuracy < weights.recent_failure_accuracy
        {
            score += weights.recent_failure_bonus;
        }
    }
    score
}

/// The IDs of up to `count` due words, most urgent first.
pub fn due_words(
    all_progress: &[WordProgress],
    count: usize,
    now: Timestamp,
    options: &SessionOptions,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let due: Vec<&WordProgress> = all_progress
        .iter()
        .filter(|p| p.is_due(now))
        .filter(|p| seen.insert(p.word_id.as_str()))
        .collect();
    let ranked: Vec<&WordProgress> = match options.ranking {
        Ranking::Weighted => {
            let mut scored: Vec<(&WordProgress, f64)> = due
                .into_iter()
                .map(|p| (p, priority(p, now, &options.weights)))
                .collect();
            // Stable, so ties keep their input order.
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
            scored.into_iter().map(|(p, _)| p).collect()
        }
        Ranking::Overdue => {
            let mut due = due;
            due.sort_by_key(|p| p.next_review);
            due
        }
    };
    ranked
        .into_iter()
        .take(count)
        .map(|p| p.word_id.clone())
        .collect()
}

/// The first `count` catalog words that have no progress record yet, in
/// catalog order.
pub fn new_words(all_word_ids: &[String], seen: &HashSet<&str>, count: usize) -> Vec<String> {
    let mut taken: HashSet<&str> = HashSet::new();
    all_word_ids
        .iter()
        .filter(|id| !seen.contains(id.as_str()))
        .filter(|id| taken.insert(id.as_str()))
        .take(count)
        .cloned()
        .collect()
}

/// Merge the two queues, two review words for every new word, until both
/// are empty.
pub fn interleave(review: Vec<String>, new: Vec<String>) -> Vec<String> {
    let mut result = Vec::with_capacity(review.len() + new.len());
    let mut review = review.into_iter().peekable();
    let mut new = new.into_iter().peekable();
    while review.peek().is_some() || new.peek().is_some() {
        result.extend(review.by_ref().take(REVIEWS_PER_NEW_WORD));
        result.extend(new.next());
    }
    result
}

/// Build the ordered list of word IDs for one session.
pub fn build_session(
    all_progress: &[WordProgress],
    all_word_ids: &[String],
    target_new: usize,
    target_review: usize,
    now: Timestamp,
    options: &SessionOptions,
) -> Vec<String> {
    let seen: HashSet<&str> = all_progress.iter().map(|p| p.word_id.as_str()).collect();
    let review = due_words(all_progress, target_review, now, options);
    let new = new_words(all_word_ids, &seen, target_new);
    log::debug!(
        "Session: {} review words, {} new words.",
        review.len(),
        new.len()
    );
    interleave(review, new)
}
