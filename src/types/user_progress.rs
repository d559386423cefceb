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

/// Per-language summary of the user's progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Distinct words reviewed at least once.
    pub words_learned: usize,
    /// Consecutive study days, as of `last_study_date`.
    pub current_streak: usize,
    /// How many times a broken streak was recovered.
    pub streak_recoveries: usize,
    /// The day of the last completed session.
    pub last_study_date: Option<Date>,
}
