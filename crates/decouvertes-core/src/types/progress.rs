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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;
use crate::schedule::FIRST_BOX;
use crate::types::card::Catalog;
use crate::types::player_id::PlayerId;
use crate::types::timestamp::Timestamp;

/// Review state of one card for one player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// The Leitner box. Boxes past the last configured box mean mastered.
    #[serde(rename = "box")]
    pub box_number: u32,
    /// Consecutive correct answers.
    pub streak: u32,
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub failed: u32,
    pub last_reviewed: Timestamp,
}

impl ProgressEntry {
    /// The state of a card the first time a player sees it.
    pub fn new(now: Timestamp) -> Self {
        Self {
            box_number: FIRST_BOX,
            streak: 0,
            passed: 0,
            failed: 0,
            last_reviewed: now,
        }
    }
}

/// One answered card, in the order answers were given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub card_id: String,
    pub timestamp: Timestamp,
    pub correct: bool,
}

/// Per-card progress, keyed by card id. This is also the whole progress file
/// in single-player mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardProgress(BTreeMap<String, ProgressEntry>);

impl CardProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, card_id: &str) -> Option<&ProgressEntry> {
        self.0.get(card_id)
    }

    pub fn insert(&mut self, card_id: impl Into<String>, entry: ProgressEntry) {
        self.0.insert(card_id.into(), entry);
    }

    /// The entry for a card, created on first access.
    pub fn entry_mut(&mut self, card_id: &str, now: Timestamp) -> &mut ProgressEntry {
        self.0
            .entry(card_id.to_string())
            .or_insert_with(|| ProgressEntry::new(now))
    }

    /// Create entries for every catalog card that doesn't have one. Returns
    /// the number of entries created.
    pub fn initialize(&mut self, catalog: &Catalog, now: Timestamp) -> usize {
        let mut created = 0;
        for card in catalog.cards() {
            if !self.0.contains_key(&card.id) {
                self.0.insert(card.id.clone(), ProgressEntry::new(now));
                created += 1;
            }
        }
        created
    }

    /// Ids of entries whose card is no longer in the catalog.
    pub fn orphans(&self, catalog: &Catalog) -> Vec<String> {
        self.0
            .keys()
            .filter(|id| !catalog.contains(id))
            .cloned()
            .collect()
    }

    /// Remove orphan entries, returning their ids.
    pub fn remove_orphans(&mut self, catalog: &Catalog) -> Vec<String> {
        let orphans = self.orphans(catalog);
        for id in orphans.iter() {
            self.0.remove(id);
        }
        orphans
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProgressEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything stored about one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub total_answered: u32,
    #[serde(default)]
    pub cards: CardProgress,
    #[serde(default)]
    pub history: Vec<HistoryEvent>,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_answered: 0,
            cards: CardProgress::new(),
            history: Vec::new(),
        }
    }
}

/// All players, keyed by id. This is the progress file in multi-player mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressCollection(BTreeMap<PlayerId, PlayerRecord>);

impl ProgressCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new player under a random id and return the id.
    pub fn create_player(&mut self, name: &str) -> Fallible<PlayerId> {
        if name.trim().is_empty() {
            return fail(ErrorKind::Validation, "A player name is required.");
        }
        let id = PlayerId::random()?;
        log::info!("Creating player '{name}' with ID {id}");
        self.0.insert(id.clone(), PlayerRecord::new(id.clone(), name));
        Ok(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.0.values()
    }

    pub fn player(&self, id: &PlayerId) -> Fallible<&PlayerRecord> {
        match self.0.get(id) {
            Some(record) => Ok(record),
            None => player_not_found(id),
        }
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Fallible<&mut PlayerRecord> {
        match self.0.get_mut(id) {
            Some(record) => Ok(record),
            None => player_not_found(id),
        }
    }

    pub fn delete_player(&mut self, id: &PlayerId) -> Fallible<PlayerRecord> {
        match self.0.remove(id) {
            Some(record) => {
                log::info!("Deleted player '{}' ({id})", record.name);
                Ok(record)
            }
            None => player_not_found(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn player_not_found<T>(id: &PlayerId) -> Fallible<T> {
    fail(ErrorKind::NotFound, format!("Player with ID '{id}' not found."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "a", "prompt": "p", "solution": "s"},
                {"id": "b", "prompt": "p", "solution": "s"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_creates_missing_entries() {
        let now = ts("2025-03-01T10:00:00.000+01:00");
        let mut progress = CardProgress::new();
        let mut seen = ProgressEntry::new(now);
        seen.box_number = 3;
        progress.insert("a", seen);
        assert_eq!(progress.initialize(&catalog(), now), 1);
        assert_eq!(progress.get("a").unwrap().box_number, 3);
        assert_eq!(progress.get("b"), Some(&ProgressEntry::new(now)));
        assert_eq!(progress.initialize(&catalog(), now), 0);
    }

    #[test]
    fn test_orphans() {
        let now = ts("2025-03-01T10:00:00.000+01:00");
        let mut progress = CardProgress::new();
        progress.insert("a", ProgressEntry::new(now));
        progress.insert("gone", ProgressEntry::new(now));
        assert_eq!(progress.orphans(&catalog()), vec!["gone".to_string()]);
        assert_eq!(progress.remove_orphans(&catalog()), vec!["gone".to_string()]);
        assert_eq!(progress.len(), 1);
        assert!(progress.orphans(&catalog()).is_empty());
    }

    #[test]
    fn test_legacy_entry_without_counters() -> Fallible<()> {
        let json = r#"{"c1": {"box": 2, "streak": 1, "last_reviewed": "2025-03-01T10:00:00.123456789+01:00"}}"#;
        let progress: CardProgress = serde_json::from_str(json)?;
        let entry = progress.get("c1").unwrap();
        assert_eq!(entry.box_number, 2);
        assert_eq!(entry.passed, 0);
        assert_eq!(entry.failed, 0);
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Fallible<()> {
        let now = ts("2025-03-01T10:00:00.250+01:00");
        let mut collection = ProgressCollection::new();
        let id = collection.create_player("Ada")?;
        let player = collection.player_mut(&id)?;
        player.cards.insert(
            "c1",
            ProgressEntry {
                box_number: 4,
                streak: 3,
                passed: 5,
                failed: 2,
                last_reviewed: now,
            },
        );
        player.history.push(HistoryEvent {
            card_id: "c1".to_string(),
            timestamp: now,
            correct: true,
        });
        player.total_answered = 1;
        let json = serde_json::to_string_pretty(&collection)?;
        let loaded: ProgressCollection = serde_json::from_str(&json)?;
        assert_eq!(loaded, collection);
        let entry = loaded.player(&id)?.cards.get("c1").unwrap();
        assert_eq!(entry.last_reviewed.to_string(), "2025-03-01T10:00:00.250+01:00");
        Ok(())
    }

    #[test]
    fn test_entry_serialization() -> Fallible<()> {
        let entry = ProgressEntry::new(ts("2025-03-01T10:00:00.000Z"));
        let json = serde_json::to_string(&entry)?;
        assert_eq!(
            json,
            r#"{"box":1,"streak":0,"passed":0,"failed":0,"last_reviewed":"2025-03-01T10:00:00.000Z"}"#
        );
        Ok(())
    }

    #[test]
    fn test_create_player_requires_name() {
        let mut collection = ProgressCollection::new();
        let err = collection.create_player("  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_delete_unknown_player() -> Fallible<()> {
        let mut collection = ProgressCollection::new();
        collection.create_player("Ada")?;
        let before = collection.clone();
        let err = collection
            .delete_player(&PlayerId::from("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(collection, before);
        Ok(())
    }

    #[test]
    fn test_delete_player() -> Fallible<()> {
        let mut collection = ProgressCollection::new();
        let id = collection.create_player("Ada")?;
        let record = collection.delete_player(&id)?;
        assert_eq!(record.name, "Ada");
        assert!(collection.is_empty());
        Ok(())
    }
}
