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
use std::fs::write;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use decouvertes_core::ErrorKind;
use decouvertes_core::ErrorReport;
use decouvertes_core::Fallible;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// The progress file, loaded once at the start of a command and written back
/// whole at the end. There is no locking: the last writer wins.
///
/// `T` is `CardProgress` in single-player mode and `ProgressCollection` in
/// multi-player mode.
pub struct ProgressFile<T> {
    path: PathBuf,
    data: T,
}

impl<T> ProgressFile<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Load the file. A missing or empty file is an empty collection.
    pub fn load(path: PathBuf) -> Fallible<Self> {
        let content = match read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                log::debug!("No progress file at {}, starting fresh", path.display());
                return Ok(Self {
                    path,
                    data: T::default(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self {
                path,
                data: T::default(),
            });
        }
        let data: T = serde_json::from_str(&content).map_err(|e| {
            ErrorReport::new(
                ErrorKind::MalformedData,
                format!("Failed to parse progress file {}: {e}", path.display()),
            )
        })?;
        log::debug!("Loaded progress from {}", path.display());
        Ok(Self { path, data })
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Rewrite the whole file.
    pub fn save(&self) -> Fallible<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        write(&self.path, json)?;
        log::debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use decouvertes_core::CardProgress;
    use decouvertes_core::ProgressCollection;
    use decouvertes_core::ProgressEntry;
    use decouvertes_core::Timestamp;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_missing_file_is_empty() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let file: ProgressFile<ProgressCollection> = ProgressFile::load(dir.join("progress.json"))?;
        assert!(file.data().is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_file_is_empty() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("progress.json");
        write(&path, "")?;
        let file: ProgressFile<CardProgress> = ProgressFile::load(path)?;
        assert!(file.data().is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("progress.json");
        write(&path, "[1, 2, 3]")?;
        let result: Fallible<ProgressFile<CardProgress>> = ProgressFile::load(path);
        assert_eq!(result.err().unwrap().kind(), ErrorKind::MalformedData);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("progress.json");
        let now = Timestamp::try_from("2025-03-01T10:00:00.123+01:00".to_string())?;
        let mut file: ProgressFile<CardProgress> = ProgressFile::load(path.clone())?;
        file.data_mut().insert(
            "c1",
            ProgressEntry {
                box_number: 3,
                streak: 2,
                passed: 7,
                failed: 1,
                last_reviewed: now,
            },
        );
        file.save()?;
        let content = read_to_string(&path)?;
        assert_eq!(
            content,
            "{\n  \"c1\": {\n    \"box\": 3,\n    \"streak\": 2,\n    \"passed\": 7,\n    \"failed\": 1,\n    \"last_reviewed\": \"2025-03-01T10:00:00.123+01:00\"\n  }\n}"
        );
        let loaded: ProgressFile<CardProgress> = ProgressFile::load(path)?;
        assert_eq!(loaded.data(), file.data());
        Ok(())
    }
}
