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

use clap::Subcommand;

use crate::collection::Collection;
use crate::collection::LANGUAGE_KEY;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::language::Language;

#[derive(Subcommand)]
pub enum LanguageAction {
    /// Print the language used when none is given.
    Show {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Save a language preference.
    Set {
        /// The language to study.
        language: String,
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Forget the saved language preference.
    Clear {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
}

pub fn language_command(action: LanguageAction) -> Fallible<()> {
    match action {
        LanguageAction::Show { directory } => {
            let coll = Collection::new(directory)?;
            println!("{}", coll.resolve_language(None)?);
        }
        LanguageAction::Set {
            language,
            directory,
        } => {
            let coll = Collection::new(directory)?;
            let language = set_language(&coll, language)?;
            println!("Language set to {language}.");
        }
        LanguageAction::Clear { directory } => {
            let coll = Collection::new(directory)?;
            coll.db.delete_setting(LANGUAGE_KEY)?;
            println!("Language preference cleared.");
        }
    }
    Ok(())
}

fn set_language(coll: &Collection, language: String) -> Fallible<Language> {
    let language = Language::new(language)?;
    if !coll.languages()?.contains(&language) {
        return fail(format!("no vocabulary for language: {language}"));
    }
    coll.db.set_setting(LANGUAGE_KEY, language.as_str())?;
    log::debug!("Saved language preference: {language}");
    Ok(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_set_and_clear() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        set_language(&coll, "french".to_string())?;
        assert_eq!(coll.saved_language()?, Some("french".to_string()));
        assert_eq!(coll.resolve_language(None)?.as_str(), "french");
        coll.db.delete_setting(LANGUAGE_KEY)?;
        assert_eq!(coll.saved_language()?, None);
        assert_eq!(coll.resolve_language(None)?.as_str(), "vietnamese");
        Ok(())
    }

    #[test]
    fn test_set_unknown_language() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        assert!(set_language(&coll, "german".to_string()).is_err());
        assert!(set_language(&coll, "Not A Language".to_string()).is_err());
        assert_eq!(coll.saved_language()?, None);
        Ok(())
    }
}
