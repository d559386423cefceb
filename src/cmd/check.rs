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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let count = check(directory)?;
    log::debug!("Checked {count} languages.");
    println!("ok");
    Ok(())
}

/// Load every catalog, returning the number of languages.
fn check(directory: Option<String>) -> Fallible<usize> {
    let coll = Collection::new(directory)?;
    let languages = coll.languages()?;
    if languages.is_empty() {
        return fail("no vocabulary found.");
    }
    for language in &languages {
        let catalog = coll.catalog(language)?;
        if catalog.is_empty() {
            return fail(format!("no words for language: {language}"));
        }
    }
    Ok(languages.len())
}
