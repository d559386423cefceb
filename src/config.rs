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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::session::DEFAULT_NEW_WORDS;
use crate::session::DEFAULT_REVIEW_WORDS;
use crate::session::PriorityWeights;
use crate::session::Ranking;
use crate::session::SessionOptions;

pub const CONFIG_FILE: &str = "vocards.toml";

/// Optional per-collection settings, read from `vocards.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The language to study when none is given or saved.
    pub default_language: Option<String>,
    pub session: SessionConfig,
    pub priority: PriorityWeights,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub new_words: usize,
    pub review_words: usize,
    pub ranking: Ranking,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            new_words: DEFAULT_NEW_WORDS,
            review_words: DEFAULT_REVIEW_WORDS,
            ranking: Ranking::default(),
        }
    }
}

impl Config {
    /// Load the config from the collection directory, or use the defaults if
    /// there is no config file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No config file, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            ranking: self.session.ranking,
            weights: self.priority.clone(),
        }
    }
}
