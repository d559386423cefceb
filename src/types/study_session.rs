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

use crate::types::date::Date;

/// One entry in the append-only study log.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// The local calendar day the session ended on.
    pub date: Date,
    pub new_words_learned: usize,
    pub words_reviewed: usize,
    /// Percentage of correct answers in the session.
    pub accuracy: f64,
    /// Duration in seconds.
    pub duration: u64,
    /// Whether every word in the session was answered.
    pub completed: bool,
}
