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

use crate::error::ErrorReport;
use crate::error::fail;

/// How well a word was recalled. The order matters: anything below `Good`
/// is a lapse.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum ReviewQuality {
    /// Complete blackout.
    Again,
    /// Wrong, but the answer seemed familiar.
    Hard,
    /// Right, with some difficulty.
    Good,
    /// Perfect recall.
    Easy,
}

impl ReviewQuality {
    pub fn value(self) -> u8 {
        match self {
            ReviewQuality::Again => 0,
            ReviewQuality::Hard => 1,
            ReviewQuality::Good => 2,
            ReviewQuality::Easy => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewQuality::Again => "again",
            ReviewQuality::Hard => "hard",
            ReviewQuality::Good => "good",
            ReviewQuality::Easy => "easy",
        }
    }

    /// Map a plain right/wrong answer onto the scale.
    #[cfg(test)]
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            ReviewQuality::Good
        } else {
            ReviewQuality::Again
        }
    }

    /// Whether the answer counts as correct for accuracy tracking.
    pub fn is_correct(self) -> bool {
        self >= ReviewQuality::Good
    }
}

impl TryFrom<u8> for ReviewQuality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReviewQuality::Again),
            1 => Ok(ReviewQuality::Hard),
            2 => Ok(ReviewQuality::Good),
            3 => Ok(ReviewQuality::Easy),
            _ => fail(format!("Invalid review quality: {value}")),
        }
    }
}
