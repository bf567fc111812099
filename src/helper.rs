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

use std::fs::write;
use std::path::PathBuf;

use decouvertes_core::Fallible;
use decouvertes_core::Timestamp;
use tempfile::tempdir;

use crate::collection::CARDS_FILE;
use crate::collection::Collection;

/// A small catalog used across command tests.
pub const TEST_CARDS: &str = r#"[
  {"id": "c1", "language": "python", "tags": ["lists"], "prompt": "Bind foo to an empty list", "solution": "foo = []"},
  {"id": "c2", "language": "javascript", "tags": ["console"], "prompt": "Print hi", "solution": "console.log('hi');"}
]"#;

pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep();
    Ok(dir)
}

/// A fresh data directory containing `cards`.
pub fn create_test_collection(cards: &str) -> Fallible<Collection> {
    let dir = create_tmp_directory()?;
    write(dir.join(CARDS_FILE), cards)?;
    Collection::open(Some(dir.display().to_string()))
}

pub fn timestamp(s: &str) -> Timestamp {
    Timestamp::try_from(s.to_string()).unwrap()
}
