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

use decouvertes_core::Fallible;
use decouvertes_core::PlayerId;
use decouvertes_core::ProgressCollection;

use crate::collection::Collection;
use crate::store::ProgressFile;

/// Register a player and print their new id.
pub fn create_player(collection: &Collection, name: &str) -> Fallible<String> {
    let mut file: ProgressFile<ProgressCollection> =
        ProgressFile::load(collection.progress_path())?;
    let id = file.data_mut().create_player(name)?;
    file.save()?;
    Ok(id.to_string())
}

pub fn list_players(collection: &Collection) -> Fallible<String> {
    let file: ProgressFile<ProgressCollection> = ProgressFile::load(collection.progress_path())?;
    if file.data().is_empty() {
        return Ok("No players found. Create one with `create-player --name=NAME`.".to_string());
    }
    let lines: Vec<String> = file
        .data()
        .players()
        .map(|player| format!("Name: {}, ID: {}", player.name, player.id))
        .collect();
    Ok(lines.join("\n"))
}

/// Remove a player and all their progress.
pub fn delete_player(collection: &Collection, player_id: &PlayerId) -> Fallible<String> {
    let mut file: ProgressFile<ProgressCollection> =
        ProgressFile::load(collection.progress_path())?;
    let record = file.data_mut().delete_player(player_id)?;
    file.save()?;
    Ok(format!(
        "Player '{}' (ID: {}) deleted.",
        record.name, record.id
    ))
}
