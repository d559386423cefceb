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

use std::collections::HashSet;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::language::Language;

pub fn list_orphans(directory: Option<String>, language: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let language = coll.resolve_language(language)?;
    for word_id in find_orphans(&coll, &language)? {
        println!("{word_id}");
    }
    Ok(())
}

/// IDs with progress in the database but no word in the catalog, sorted.
fn find_orphans(coll: &Collection, language: &Language) -> Fallible<Vec<String>> {
    let catalog = coll.catalog(language)?;
    let catalog_ids: HashSet<String> = catalog.word_ids().into_iter().collect();
    let db_ids: HashSet<String> = coll
        .db
        .all_word_progress(language)?
        .into_iter()
        .map(|p| p.word_id)
        .collect();
    // If a word is in the database, but not in the catalog, it is an orphan.
    let mut orphans: Vec<String> = db_ids.difference(&catalog_ids).cloned().collect();
    // Sort the orphans for consistent output.
    orphans.sort();
    Ok(orphans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::timestamp::Timestamp;
    use crate::types::word_progress::WordProgress;

    #[test]
    fn test_find_orphans() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let language = coll.resolve_language(None)?;
        assert!(find_orphans(&coll, &language)?.is_empty());
        for id in ["vi-zz", "vi-me", "vi-aa"] {
            coll.db
                .save_word_progress(&language, &WordProgress::new(id), Timestamp::now())?;
        }
        assert_eq!(find_orphans(&coll, &language)?, vec!["vi-aa", "vi-zz"]);
        Ok(())
    }
}
