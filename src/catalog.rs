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

//! Loading vocabulary word lists.

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::language::Language;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VocabularyWord {
    /// Stable identifier, referenced by progress records.
    pub id: String,
    /// The word in the language being learned.
    pub term: String,
    pub english: String,
    /// Romanization or phonetic hint.
    #[serde(default)]
    pub pronunciation: String,
    pub category: String,
    /// From 1 (easiest) to 5.
    pub difficulty: u8,
    #[serde(default)]
    pub audio_url: Option<String>,
}

/// The words of one language, in catalog order.
pub struct Catalog {
    words: Vec<VocabularyWord>,
}

impl Catalog {
    /// Load every `*.json` file under `directory/language`, in path order.
    pub fn load(directory: &Path, language: &Language) -> Fallible<Self> {
        let root = directory.join(language.as_str());
        if !root.is_dir() {
            return fail(format!("no vocabulary for language: {language}"));
        }
        log::debug!("Loading {language} vocabulary...");
        let start = Instant::now();
        let mut words = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if is_word_list(path) {
                let content = read_to_string(path)?;
                let list: Vec<VocabularyWord> = serde_json::from_str(&content)?;
                words.extend(list);
            }
        }
        let catalog = Self::from_words(words)?;
        let duration = start.elapsed().as_millis();
        log::debug!("Loaded {} words in {duration}ms.", catalog.len());
        Ok(catalog)
    }

    pub fn from_words(words: Vec<VocabularyWord>) -> Fallible<Self> {
        let mut ids: HashSet<&str> = HashSet::new();
        for word in &words {
            if !ids.insert(word.id.as_str()) {
                return fail(format!("duplicate word ID: {}", word.id));
            }
            if !(1..=5).contains(&word.difficulty) {
                return fail(format!(
                    "word {} has difficulty {}, expected 1 to 5",
                    word.id, word.difficulty
                ));
            }
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[VocabularyWord] {
        &self.words
    }

    pub fn word_ids(&self) -> Vec<String> {
        self.words.iter().map(|w| w.id.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&VocabularyWord> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn by_category(&self, category: &str) -> Vec<&VocabularyWord> {
        self.words.iter().filter(|w| w.category == category).collect()
    }

    pub fn by_difficulty(&self, difficulty: u8) -> Vec<&VocabularyWord> {
        self.words
            .iter()
            .filter(|w| w.difficulty == difficulty)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Languages with at least one word list, sorted by name.
pub fn available_languages(directory: &Path) -> Fallible<Vec<Language>> {
    let mut languages = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        // Skip hidden directories and anything that is not a language name.
        let Ok(language) = Language::new(name) else {
            continue;
        };
        let has_words = WalkDir::new(entry.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .any(|e| is_word_list(e.path()));
        if has_words {
            languages.push(language);
        }
    }
    Ok(languages)
}

fn is_word_list(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}
