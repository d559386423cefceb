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

use std::env::current_dir;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::catalog::available_languages;
use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::language::Language;

/// The settings key for the saved language preference.
pub const LANGUAGE_KEY: &str = "language";

/// A collection directory: word lists, config, and the progress database.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub config: Config,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join("vocards.db");
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;

        Ok(Self {
            directory,
            db,
            config,
        })
    }

    pub fn languages(&self) -> Fallible<Vec<Language>> {
        available_languages(&self.directory)
    }

    /// Pick the language to work with: the one requested, else the saved
    /// preference, else the configured default, else the first available.
    pub fn resolve_language(&self, requested: Option<String>) -> Fallible<Language> {
        let available = self.languages()?;
        let candidate: Option<String> = match requested {
            Some(name) => Some(name),
            None => self
                .saved_language()?
                .or_else(|| self.config.default_language.clone()),
        };
        match candidate {
            Some(name) => {
                let language = Language::new(name)?;
                if available.contains(&language) {
                    Ok(language)
                } else {
                    fail(format!("no vocabulary for language: {language}"))
                }
            }
            None => match available.into_iter().next() {
                Some(language) => Ok(language),
                None => fail("no vocabulary found."),
            },
        }
    }

    pub fn saved_language(&self) -> Fallible<Option<String>> {
        self.db.get_setting(LANGUAGE_KEY)
    }

    pub fn catalog(&self, language: &Language) -> Fallible<Catalog> {
        Catalog::load(&self.directory, language)
    }
}
