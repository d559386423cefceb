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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::language::Language;
use crate::types::study_session::StudySession;
use crate::types::timestamp::Timestamp;
use crate::types::user_progress::UserProgress;
use crate::types::word_progress::WordProgress;
use crate::types::word_progress::to_count;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Every word progress record for a language, ordered by word ID.
    pub fn all_word_progress(&self, language: &Language) -> Fallible<Vec<WordProgress>> {
        let sql = "select word_id, accuracy, times_reviewed, last_reviewed, next_review, ease_factor, interval_days from word_progress where language = ? order by word_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([language.as_str()])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(read_word_progress(row)?);
        }
        Ok(result)
    }

    /// A word's progress, or `None` if it was never reviewed.
    pub fn get_word_progress(
        &self,
        language: &Language,
        word_id: &str,
    ) -> Fallible<Option<WordProgress>> {
        let sql = "select word_id, accuracy, times_reviewed, last_reviewed, next_review, ease_factor, interval_days from word_progress where language = ? and word_id = ?;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query((language.as_str(), word_id))?;
        match rows.next()? {
            Some(row) => Ok(Some(read_word_progress(row)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a word's progress.
    pub fn save_word_progress(
        &self,
        language: &Language,
        progress: &WordProgress,
        saved_at: Timestamp,
    ) -> Fallible<()> {
        progress.validate()?;
        let sql = "insert into word_progress (language, word_id, accuracy, times_reviewed, last_reviewed, next_review, ease_factor, interval_days, created_at, updated_at) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) on conflict (language, word_id) do update set accuracy = excluded.accuracy, times_reviewed = excluded.times_reviewed, last_reviewed = excluded.last_reviewed, next_review = excluded.next_review, ease_factor = excluded.ease_factor, interval_days = excluded.interval_days, updated_at = excluded.updated_at;";
        self.conn.execute(
            sql,
            (
                language.as_str(),
                &progress.word_id,
                progress.accuracy,
                progress.times_reviewed as i64,
                progress.last_reviewed,
                progress.next_review,
                progress.ease_factor,
                progress.interval_days as i64,
                saved_at,
                saved_at,
            ),
        )?;
        Ok(())
    }

    /// The user's progress for a language. Created on first access.
    pub fn get_user_progress(&self, language: &Language) -> Fallible<UserProgress> {
        let sql = "select words_learned, current_streak, streak_recoveries, last_study_date from user_progress where language = ?;";
        let row: Option<(i64, i64, i64, Option<Date>)> = self
            .conn
            .query_row(sql, [language.as_str()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .optional()?;
        match row {
            Some((words_learned, current_streak, streak_recoveries, last_study_date)) => {
                Ok(UserProgress {
                    words_learned: to_count("words_learned", words_learned)?,
                    current_streak: to_count("current_streak", current_streak)?,
                    streak_recoveries: to_count("streak_recoveries", streak_recoveries)?,
                    last_study_date,
                })
            }
            None => {
                log::debug!("Initializing {language} progress.");
                let progress = UserProgress::default();
                self.save_user_progress(language, &progress)?;
                Ok(progress)
            }
        }
    }

    pub fn save_user_progress(&self, language: &Language, progress: &UserProgress) -> Fallible<()> {
        let sql = "insert into user_progress (language, words_learned, current_streak, streak_recoveries, last_study_date) values (?, ?, ?, ?, ?) on conflict (language) do update set words_learned = excluded.words_learned, current_streak = excluded.current_streak, streak_recoveries = excluded.streak_recoveries, last_study_date = excluded.last_study_date;";
        self.conn.execute(
            sql,
            (
                language.as_str(),
                progress.words_learned as i64,
                progress.current_streak as i64,
                progress.streak_recoveries as i64,
                progress.last_study_date,
            ),
        )?;
        Ok(())
    }

    /// Append a session to the study log.
    pub fn insert_session(&self, language: &Language, session: &StudySession) -> Fallible<()> {
        let sql = "insert into sessions (language, date, new_words_learned, words_reviewed, accuracy, duration, completed) values (?, ?, ?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                language.as_str(),
                session.date,
                session.new_words_learned as i64,
                session.words_reviewed as i64,
                session.accuracy,
                session.duration as i64,
                session.completed,
            ),
        )?;
        Ok(())
    }

    /// The study log for a language, oldest first.
    pub fn sessions(&self, language: &Language) -> Fallible<Vec<StudySession>> {
        let sql = "select date, new_words_learned, words_reviewed, accuracy, duration, completed from sessions where language = ? order by session_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([language.as_str()])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let new_words_learned: i64 = row.get(1)?;
            let words_reviewed: i64 = row.get(2)?;
            let duration: i64 = row.get(4)?;
            result.push(StudySession {
                date: row.get(0)?,
                new_words_learned: to_count("new_words_learned", new_words_learned)?,
                words_reviewed: to_count("words_reviewed", words_reviewed)?,
                accuracy: row.get(3)?,
                duration: to_count("duration", duration)? as u64,
                completed: row.get(5)?,
            });
        }
        Ok(result)
    }

    pub fn get_setting(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from settings where key = ?;";
        let value = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert into settings (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }

    pub fn delete_setting(&self, key: &str) -> Fallible<()> {
        self.conn.execute("delete from settings where key = ?;", [key])?;
        Ok(())
    }
}

fn read_word_progress(row: &Row) -> Fallible<WordProgress> {
    let times_reviewed: i64 = row.get(2)?;
    let interval_days: i64 = row.get(6)?;
    let progress = WordProgress {
        word_id: row.get(0)?,
        accuracy: row.get(1)?,
        times_reviewed: to_count("times_reviewed", times_reviewed)?,
        last_reviewed: row.get(3)?,
        next_review: row.get(4)?,
        ease_factor: row.get(5)?,
        interval_days: to_count("interval_days", interval_days)?,
    };
    progress.validate()?;
    Ok(progress)
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["word_progress"], |row| row.get(0))?;
    Ok(count > 0)
}
