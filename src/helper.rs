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

use std::fs::copy;
use std::fs::create_dir_all;
use std::path::PathBuf;

use tempfile::TempDir;
use tempfile::tempdir;
use walkdir::WalkDir;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Copy the `test` collection into a fresh temporary directory, leaving out
/// any database, so tests never write into the fixture.
pub fn create_tmp_copy_of_test_directory() -> Fallible<TempDir> {
    let source: PathBuf = PathBuf::from("./test").canonicalize()?;
    let target: TempDir = tempdir()?;
    for entry in WalkDir::new(&source).min_depth(1) {
        let entry = entry?;
        let path = entry.path();
        let relative = path
            .strip_prefix(&source)
            .map_err(|_| ErrorReport::new("path outside the test directory"))?;
        let target_path = target.path().join(relative);
        if path.is_dir() {
            create_dir_all(&target_path)?;
        } else if path.file_name().is_some_and(|name| name != "vocards.db") {
            copy(path, &target_path)?;
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_copy_of_test_directory() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        assert!(dir.path().join("vocards.toml").exists());
        assert!(dir.path().join("vietnamese").join("greetings.json").exists());
        Ok(())
    }
}
