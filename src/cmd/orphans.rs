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

//! Orphans are progress entries for cards that are no longer in the catalog.

use decouvertes_core::CardProgress;
use decouvertes_core::Catalog;
use decouvertes_core::Fallible;
use decouvertes_core::PlayerId;
use decouvertes_core::ProgressCollection;

use crate::collection::Collection;
use crate::store::ProgressFile;

pub fn list_orphans(collection: &Collection, player_id: Option<PlayerId>) -> Fallible<String> {
    let catalog: Catalog = collection.catalog()?;
    let orphans: Vec<String> = match player_id {
        None => {
            let file: ProgressFile<CardProgress> = ProgressFile::load(collection.progress_path())?;
            file.data().orphans(&catalog)
        }
        Some(player_id) => {
            let file: ProgressFile<ProgressCollection> =
                ProgressFile::load(collection.progress_path())?;
            file.data().player(&player_id)?.cards.orphans(&catalog)
        }
    };
    Ok(orphans.join("\n"))
}

pub fn delete_orphans(collection: &Collection, player_id: Option<PlayerId>) -> Fallible<String> {
    let catalog: Catalog = collection.catalog()?;
    let removed: Vec<String> = match player_id {
        None => {
            let mut file: ProgressFile<CardProgress> =
                ProgressFile::load(collection.progress_path())?;
            let removed = file.data_mut().remove_orphans(&catalog);
            if !removed.is_empty() {
                file.save()?;
            }
            removed
        }
        Some(player_id) => {
            let mut file: ProgressFile<ProgressCollection> =
                ProgressFile::load(collection.progress_path())?;
            let removed = file
                .data_mut()
                .player_mut(&player_id)?
                .cards
                .remove_orphans(&catalog);
            if !removed.is_empty() {
                file.save()?;
            }
            removed
        }
    };
    for id in removed.iter() {
        log::info!("Removed orphan progress entry '{id}'");
    }
    Ok(format!("Deleted {} orphan entries.", removed.len()))
}
