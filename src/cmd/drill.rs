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

use std::collections::HashSet;
use std::io::BufRead;
use std::io::Write;

use crate::catalog::VocabularyWord;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::record_review;
use crate::session::build_session;
use crate::streak::advance_streak;
use crate::types::review_quality::ReviewQuality;
use crate::types::study_session::StudySession;
use crate::types::word_progress::WordProgress;

#[derive(Default)]
pub struct DrillOptions {
    pub language: Option<String>,
    pub new_words: Option<usize>,
    pub review_words: Option<usize>,
    pub category: Option<String>,
    pub difficulty: Option<u8>,
}

/// What happened in a drill.
#[derive(Debug, PartialEq)]
pub struct DrillSummary {
    pub planned: usize,
    pub new_words: usize,
    pub reviewed_words: usize,
    pub correct: usize,
    pub completed: bool,
    pub streak: usize,
}

pub fn drill(directory: Option<String>, options: DrillOptions) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_drill(&coll, &options, &SystemClock, &mut input, &mut output)?;
    Ok(())
}

pub fn run_drill(
    coll: &Collection,
    options: &DrillOptions,
    clock: &dyn Clock,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Fallible<DrillSummary> {
    let language = coll.resolve_language(options.language.clone())?;
    let catalog = coll.catalog(&language)?;

    let mut words: Vec<&VocabularyWord> = match &options.category {
        Some(category) => catalog.by_category(category),
        None => catalog.words().iter().collect(),
    };
    if let Some(difficulty) = options.difficulty {
        let at_level: HashSet<&str> = catalog
            .by_difficulty(difficulty)
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();
        words.retain(|w| at_level.contains(w.id.as_str()));
    }
    let word_ids: Vec<String> = words.iter().map(|w| w.id.clone()).collect();
    let in_scope: HashSet<&str> = word_ids.iter().map(|id| id.as_str()).collect();
    let all_progress: Vec<WordProgress> = coll
        .db
        .all_word_progress(&language)?
        .into_iter()
        .filter(|p| in_scope.contains(p.word_id.as_str()))
        .collect();

    let started_at = clock.now();
    let target_new = options.new_words.unwrap_or(coll.config.session.new_words);
    let target_review = options
        .review_words
        .unwrap_or(coll.config.session.review_words);
    let session_words = build_session(
        &all_progress,
        &word_ids,
        target_new,
        target_review,
        started_at,
        &coll.config.session_options(),
    );

    let mut user = coll.db.get_user_progress(&language)?;
    let mut summary = DrillSummary {
        planned: session_words.len(),
        new_words: 0,
        reviewed_words: 0,
        correct: 0,
        completed: false,
        streak: user.current_streak,
    };
    if session_words.is_empty() {
        writeln!(output, "No words to study today.")?;
        return Ok(summary);
    }
    writeln!(
        output,
        "Studying {} {language} words. Enter 1 (again), 2 (hard), 3 (good), 4 (easy), or q to stop.",
        session_words.len()
    )?;

    for (index, word_id) in session_words.iter().enumerate() {
        let Some(word) = catalog.get(word_id) else {
            return fail(format!("word {word_id} is missing from the catalog."));
        };
        writeln!(output)?;
        writeln!(output, "[{}/{}] {}", index + 1, session_words.len(), word.term)?;
        writeln!(output, "(press enter to reveal)")?;
        output.flush()?;
        if read_line(input)?.is_none() {
            break;
        }
        if word.pronunciation.is_empty() {
            writeln!(output, "{}", word.english)?;
        } else {
            writeln!(output, "{} [{}]", word.english, word.pronunciation)?;
        }
        let Some(quality) = read_quality(input, output)? else {
            break;
        };

        let now = clock.now();
        let previous = coll.db.get_word_progress(&language, word_id)?;
        let is_new = previous.is_none();
        let progress = previous.unwrap_or_else(|| WordProgress::new(word_id.as_str()));
        let updated = record_review(&progress, quality, now)?;
        log::debug!(
            "{} {} EF={:.2} I={}d due={}",
            word_id,
            quality.as_str(),
            updated.ease_factor,
            updated.interval_days,
            updated
                .next_review
                .map(|ts| ts.local_date().to_string())
                .unwrap_or_default()
        );
        coll.db.save_word_progress(&language, &updated, now)?;

        if is_new {
            user.words_learned += 1;
            coll.db.save_user_progress(&language, &user)?;
            summary.new_words += 1;
        } else {
            summary.reviewed_words += 1;
        }
        if quality.is_correct() {
            summary.correct += 1;
        }
    }

    let answered = summary.new_words + summary.reviewed_words;
    summary.completed = answered == session_words.len();
    if answered > 0 {
        let ended_at = clock.now();
        let session = StudySession {
            date: ended_at.local_date(),
            new_words_learned: summary.new_words,
            words_reviewed: summary.reviewed_words,
            accuracy: summary.correct as f64 * 100.0 / answered as f64,
            duration: ended_at.seconds_since(started_at),
            completed: summary.completed,
        };
        coll.db.insert_session(&language, &session)?;
        log::debug!("Session saved.");
    }
    if summary.completed {
        let today = clock.today();
        user.current_streak = advance_streak(&user, today);
        user.last_study_date = Some(today);
        coll.db.save_user_progress(&language, &user)?;
        log::debug!("Streak is now {}.", user.current_streak);
        summary.streak = user.current_streak;
    }

    writeln!(output)?;
    if summary.completed {
        writeln!(output, "Session complete!")?;
    } else {
        writeln!(output, "Session ended early.")?;
    }
    writeln!(
        output,
        "{} new, {} reviewed, {} correct. Streak: {} days.",
        summary.new_words, summary.reviewed_words, summary.correct, summary.streak
    )?;
    Ok(summary)
}

/// Read one line, trimmed. `None` on end of input.
fn read_line(input: &mut impl BufRead) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until a valid grade is entered. `None` means stop the session.
fn read_quality(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Fallible<Option<ReviewQuality>> {
    loop {
        write!(output, "Grade: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line == "q" {
            return Ok(None);
        }
        match line.parse::<u8>() {
            Ok(n @ 1..=4) => return Ok(Some(ReviewQuality::try_from(n - 1)?)),
            _ => writeln!(
                output,
                "Invalid input. Enter a number between 1 and 4, or q to stop."
            )?,
        }
    }
}
