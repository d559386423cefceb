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

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::streak::can_recover_streak;
use crate::streak::compute_streak;
use crate::streak::has_studied_today;
use crate::types::date::Date;
use crate::types::language::Language;
use crate::types::word_progress::WordProgress;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(
    directory: Option<String>,
    language: Option<String>,
    format: StatsFormat,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let language = coll.resolve_language(language)?;
    let stats = get_stats(&coll, &language, &SystemClock)?;
    let mut output = std::io::stdout();
    write_stats(&stats, format, &mut output)
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    language: Language,
    words_in_catalog: usize,
    words_learned: usize,
    words_mastered: usize,
    due_now: usize,
    new_today: usize,
    reviewed_today: usize,
    current_streak: usize,
    studied_today: bool,
    can_recover_streak: bool,
    streak_recoveries: usize,
    last_study_date: Option<Date>,
}

fn get_stats(coll: &Collection, language: &Language, clock: &dyn Clock) -> Fallible<Stats> {
    let now = clock.now();
    let today = clock.today();
    let catalog = coll.catalog(language)?;
    let progress = coll.db.all_word_progress(language)?;
    let user = coll.db.get_user_progress(language)?;
    let sessions = coll.db.sessions(language)?;
    let (new_today, reviewed_today) = today_counts(&progress, today);
    let studied_today = has_studied_today(&sessions, today);
    Ok(Stats {
        language: language.clone(),
        words_in_catalog: catalog.len(),
        words_learned: user.words_learned,
        words_mastered: progress.iter().filter(|p| p.mastered()).count(),
        due_now: progress.iter().filter(|p| p.is_due(now)).count(),
        new_today,
        reviewed_today,
        current_streak: compute_streak(&sessions, today),
        studied_today,
        can_recover_streak: can_recover_streak(user.last_study_date, studied_today, today),
        streak_recoveries: user.streak_recoveries,
        last_study_date: user.last_study_date,
    })
}

/// Words last reviewed today, split into first reviews and repeat reviews.
fn today_counts(progress: &[WordProgress], today: Date) -> (usize, usize) {
    let studied: Vec<&WordProgress> = progress
        .iter()
        .filter(|p| p.last_reviewed.is_some_and(|ts| ts.local_date() == today))
        .collect();
    let new = studied.iter().filter(|p| p.times_reviewed == 1).count();
    let reviewed = studied.iter().filter(|p| p.times_reviewed > 1).count();
    (new, reviewed)
}

fn write_stats(stats: &Stats, format: StatsFormat, output: &mut impl Write) -> Fallible<()> {
    match format {
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(stats)?;
            writeln!(output, "{json}")?;
        }
        StatsFormat::Text => {
            writeln!(output, "Language:         {}", stats.language)?;
            writeln!(
                output,
                "Words learned:    {} of {}",
                stats.words_learned, stats.words_in_catalog
            )?;
            writeln!(output, "Words mastered:   {}", stats.words_mastered)?;
            writeln!(output, "Due now:          {}", stats.due_now)?;
            writeln!(
                output,
                "Today:            {} new, {} reviewed",
                stats.new_today, stats.reviewed_today
            )?;
            writeln!(output, "Streak:           {} days", stats.current_streak)?;
            if stats.can_recover_streak {
                writeln!(output, "Study today to keep your streak going.")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::clock::FixedClock;
    use crate::cmd::drill::DrillOptions;
    use crate::cmd::drill::run_drill;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::timestamp::Timestamp;

    fn clock(day: u32) -> FixedClock {
        FixedClock(Timestamp::new(
            Utc.with_ymd_and_hms(2025, 5, day, 12, 0, 0).unwrap(),
        ))
    }

    fn drill(coll: &Collection, clock: &FixedClock, input: &str) -> Fallible<()> {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        let options = DrillOptions {
            new_words: Some(2),
            ..DrillOptions::default()
        };
        run_drill(coll, &options, clock, &mut input, &mut output)?;
        Ok(())
    }

    #[test]
    fn test_empty_stats() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let language = coll.resolve_language(None)?;
        let stats = get_stats(&coll, &language, &clock(1))?;
        assert_eq!(stats.words_in_catalog, 7);
        assert_eq!(stats.words_learned, 0);
        assert_eq!(stats.current_streak, 0);
        assert!(!stats.studied_today);
        assert!(!stats.can_recover_streak);
        Ok(())
    }

    #[test]
    fn test_stats_after_drills() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let language = coll.resolve_language(None)?;
        drill(&coll, &clock(1), "\n3\n\n3\n")?;

        let stats = get_stats(&coll, &language, &clock(1))?;
        assert_eq!(stats.words_learned, 2);
        assert_eq!(stats.new_today, 2);
        assert_eq!(stats.reviewed_today, 0);
        assert_eq!(stats.due_now, 0);
        assert_eq!(stats.current_streak, 1);
        assert!(stats.studied_today);

        // The next day the streak is still alive, but at risk.
        let stats = get_stats(&coll, &language, &clock(2))?;
        assert_eq!(stats.due_now, 2);
        assert_eq!(stats.new_today, 0);
        assert_eq!(stats.current_streak, 1);
        assert!(!stats.studied_today);
        assert!(stats.can_recover_streak);

        // Missing two days breaks it.
        let stats = get_stats(&coll, &language, &clock(4))?;
        assert_eq!(stats.current_streak, 0);
        Ok(())
    }

    #[test]
    fn test_write_json() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let language = coll.resolve_language(None)?;
        let stats = get_stats(&coll, &language, &clock(1))?;
        let mut output: Vec<u8> = Vec::new();
        write_stats(&stats, StatsFormat::Json, &mut output)?;
        let json: serde_json::Value = serde_json::from_slice(&output)?;
        assert_eq!(json["language"], "vietnamese");
        assert_eq!(json["wordsInCatalog"], 7);
        assert_eq!(json["lastStudyDate"], serde_json::Value::Null);
        Ok(())
    }

    #[test]
    fn test_write_text() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let language = coll.resolve_language(None)?;
        let stats = get_stats(&coll, &language, &clock(1))?;
        let mut output: Vec<u8> = Vec::new();
        write_stats(&stats, StatsFormat::Text, &mut output)?;
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Words learned:    0 of 7"));
        Ok(())
    }
}
