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

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;

/// A single flashcard. Field order matches the catalog file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub prompt: String,
    pub solution: String,
}

/// The immutable, ordered set of cards loaded for one invocation.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate card ids.
    pub fn new(cards: Vec<Card>) -> Fallible<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for card in cards.iter() {
            if !seen.insert(card.id.as_str()) {
                return fail(
                    ErrorKind::MalformedData,
                    format!("Duplicate card ID '{}' in catalog.", card.id),
                );
            }
        }
        Ok(Self { cards })
    }

    pub fn from_json(json: &str) -> Fallible<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::new(cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    pub fn find(&self, id: &str) -> Fallible<&Card> {
        match self.get(id) {
            Some(card) => Ok(card),
            None => fail(
                ErrorKind::NotFound,
                format!("Card with ID '{id}' not found."),
            ),
        }
    }
}
