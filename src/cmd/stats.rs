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
use decouvertes_core::PlayerStats;
use decouvertes_core::ProgressCollection;
use decouvertes_core::Timestamp;

use crate::collection::Collection;
use crate::store::ProgressFile;

pub fn print_stats(
    collection: &Collection,
    player_id: &PlayerId,
    now: Timestamp,
) -> Fallible<String> {
    let file: ProgressFile<ProgressCollection> = ProgressFile::load(collection.progress_path())?;
    let player = file.data().player(player_id)?;
    Ok(PlayerStats::compute(player, now).to_string())
}
