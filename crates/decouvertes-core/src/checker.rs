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

use serde::Serialize;

use crate::error::Fallible;
use crate::schedule::FIRST_BOX;
use crate::types::card::Catalog;
use crate::types::progress::CardProgress;
use crate::types::progress::HistoryEvent;
use crate::types::progress::PlayerRecord;
use crate::types::progress::ProgressEntry;
use crate::types::timestamp::Timestamp;

/// The outcome of checking an answer, as printed by `check-answer`.
#[derive(Debug, PartialEq, Serialize)]
pub struct CheckResult {
    pub correct: bool,
    pub new_box: u32,
    /// Always the card's solution, so it can be shown after a miss.
    pub solution: String,
}

/// Canonical form for comparing answers: lowercase, no whitespace at all,
/// and no trailing semicolons. Characters are lowercased one at a time, so
/// the result doesn't depend on where the whitespace was.
pub fn normalize_answer(s: &str) -> String {
    let squashed: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    squashed.trim_end_matches(';').to_string()
}

pub fn answers_match(answer: &str, solution: &str) -> bool {
    normalize_answer(answer) == normalize_answer(solution)
}

/// Move a card between boxes. A correct answer promotes it one box, with no
/// upper bound; a miss sends it back to the first box.
pub fn apply_answer(entry: &mut ProgressEntry, correct: bool, now: Timestamp) {
    if correct {
        entry.box_number += 1;
        entry.streak += 1;
        entry.passed += 1;
    } else {
        entry.box_number = FIRST_BOX;
        entry.streak = 0;
        entry.failed += 1;
    }
    entry.last_reviewed = now;
}

/// Check an answer against a card and update that card's progress.
pub fn check_answer(
    catalog: &Catalog,
    progress: &mut CardProgress,
    card_id: &str,
    answer: &str,
    now: Timestamp,
) -> Fallible<CheckResult> {
    let card = catalog.find(card_id)?;
    let correct = answers_match(answer, &card.solution);
    let entry = progress.entry_mut(card_id, now);
    let old_box = entry.box_number;
    apply_answer(entry, correct, now);
    log::debug!(
        "Card '{card_id}' answered {}: box {old_box} -> {}",
        if correct { "correctly" } else { "incorrectly" },
        entry.box_number
    );
    Ok(CheckResult {
        correct,
        new_box: entry.box_number,
        solution: card.solution.clone(),
    })
}

/// Like [`check_answer`], and also records the answer in the player's
/// history.
pub fn check_player_answer(
    catalog: &Catalog,
    player: &mut PlayerRecord,
    card_id: &str,
    answer: &str,
    now: Timestamp,
) -> Fallible<CheckResult> {
    let result = check_answer(catalog, &mut player.cards, card_id, answer, now)?;
    player.total_answered += 1;
    player.history.push(HistoryEvent {
        card_id: card_id.to_string(),
        timestamp: now,
        correct: result.correct,
    });
    Ok(result)
}
