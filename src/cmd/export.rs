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

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::language::Language;
use crate::types::study_session::StudySession;
use crate::types::timestamp::Timestamp;
use crate::types::user_progress::UserProgress;
use crate::types::word_progress::WordProgress;

pub fn export_collection(directory: Option<String>, language: Option<String>) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let language = coll.resolve_language(language)?;
    let export: Export = get_export(&coll, language)?;
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    language: Language,
    user_progress: UserProgress,
    words: Vec<WordExport>,
    sessions: Vec<StudySession>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WordExport {
    word_id: String,
    /// `None` if the word is no longer in the catalog.
    term: Option<String>,
    accuracy: f64,
    times_reviewed: usize,
    last_reviewed: Option<Timestamp>,
    next_review: Option<Timestamp>,
    ease_factor: f64,
    interval_days: usize,
    mastered: bool,
}

fn get_export(coll: &Collection, language: Language) -> Fallible<Export> {
    let catalog = coll.catalog(&language)?;
    let user_progress = coll.db.get_user_progress(&language)?;
    let words: Vec<WordExport> = coll
        .db
        .all_word_progress(&language)?
        .into_iter()
        .map(|p: WordProgress| WordExport {
            term: catalog.get(&p.word_id).map(|w| w.term.clone()),
            mastered: p.mastered(),
            word_id: p.word_id,
            accuracy: p.accuracy,
            times_reviewed: p.times_reviewed,
            last_reviewed: p.last_reviewed,
            next_review: p.next_review,
            ease_factor: p.ease_factor,
            interval_days: p.interval_days,
        })
        .collect();
    let sessions = coll.db.sessions(&language)?;
    Ok(Export {
        language,
        user_progress,
        words,
        sessions,
    })
}
