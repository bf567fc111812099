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

use decouvertes_core::BoxSchedule;
use decouvertes_core::CardProgress;
use decouvertes_core::Catalog;
use decouvertes_core::CheckResult;
use decouvertes_core::Done;
use decouvertes_core::ErrorKind;
use decouvertes_core::Fallible;
use decouvertes_core::PlayerId;
use decouvertes_core::ProgressCollection;
use decouvertes_core::Timestamp;
use decouvertes_core::TinyRng;
use decouvertes_core::check_answer;
use decouvertes_core::check_player_answer;
use decouvertes_core::fail;
use decouvertes_core::select_card;

use crate::collection::Collection;
use crate::store::ProgressFile;

/// Print the next card to review as JSON, or the "done" sentinel.
///
/// Cards the player hasn't seen yet are put in the first box, and that is
/// saved before drawing.
pub fn get_card(
    collection: &Collection,
    player_id: Option<PlayerId>,
    rng: &mut TinyRng,
    now: Timestamp,
) -> Fallible<String> {
    let catalog: Catalog = collection.catalog()?;
    let schedule: BoxSchedule = collection.schedule()?;
    match player_id {
        None => {
            let mut file: ProgressFile<CardProgress> =
                ProgressFile::load(collection.progress_path())?;
            if file.data_mut().initialize(&catalog, now) > 0 {
                file.save()?;
            }
            render_selection(&catalog, file.data(), &schedule, rng)
        }
        Some(player_id) => {
            let mut file: ProgressFile<ProgressCollection> =
                ProgressFile::load(collection.progress_path())?;
            let player = file.data_mut().player_mut(&player_id)?;
            if player.cards.initialize(&catalog, now) > 0 {
                file.save()?;
            }
            let player = file.data().player(&player_id)?;
            render_selection(&catalog, &player.cards, &schedule, rng)
        }
    }
}

fn render_selection(
    catalog: &Catalog,
    progress: &CardProgress,
    schedule: &BoxSchedule,
    rng: &mut TinyRng,
) -> Fallible<String> {
    let json = match select_card(catalog, progress, schedule, rng) {
        Some(card) => serde_json::to_string(card)?,
        None => serde_json::to_string(&Done::default())?,
    };
    Ok(json)
}

/// Check an answer, update the card's box, and print the result as JSON.
pub fn check_card_answer(
    collection: &Collection,
    player_id: Option<PlayerId>,
    card_id: &str,
    answer: &str,
    now: Timestamp,
) -> Fallible<String> {
    if card_id.is_empty() || answer.is_empty() {
        return fail(
            ErrorKind::Validation,
            "--id and --answer flags are required for check-answer",
        );
    }
    let catalog: Catalog = collection.catalog()?;
    let result: CheckResult = match player_id {
        None => {
            let mut file: ProgressFile<CardProgress> =
                ProgressFile::load(collection.progress_path())?;
            let result = check_answer(&catalog, file.data_mut(), card_id, answer, now)?;
            file.save()?;
            result
        }
        Some(player_id) => {
            let mut file: ProgressFile<ProgressCollection> =
                ProgressFile::load(collection.progress_path())?;
            let player = file.data_mut().player_mut(&player_id)?;
            let result = check_player_answer(&catalog, player, card_id, answer, now)?;
            file.save()?;
            result
        }
    };
    Ok(serde_json::to_string(&result)?)
}
