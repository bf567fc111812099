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

//! Picking the next card to review.
//!
//! Cards are grouped by box. A box is drawn with probability proportional to
//! its weight (empty boxes don't count), then a card is drawn uniformly from
//! that box.

use serde::Serialize;

use crate::rng::TinyRng;
use crate::rng::WeightedSampler;
use crate::schedule::BoxSchedule;
use crate::types::card::Card;
use crate::types::card::Catalog;
use crate::types::progress::CardProgress;

/// Id of the sentinel emitted when no card is eligible.
pub const DONE_ID: &str = "done";

pub const DONE_PROMPT: &str = "Congratulations, you have mastered all cards!";

/// The sentinel printed instead of a card once every card is mastered.
#[derive(Debug, PartialEq, Serialize)]
pub struct Done {
    pub id: &'static str,
    pub prompt: &'static str,
}

impl Default for Done {
    fn default() -> Self {
        Self {
            id: DONE_ID,
            prompt: DONE_PROMPT,
        }
    }
}

/// Group catalog cards by box. `buckets[i]` holds the cards in box `i + 1`.
/// Cards without an entry, or outside the schedule's boxes, are left out.
fn bucket_cards<'a>(
    catalog: &'a Catalog,
    progress: &CardProgress,
    schedule: &BoxSchedule,
) -> Vec<Vec<&'a Card>> {
    let mut buckets: Vec<Vec<&Card>> = schedule.boxes().map(|_| Vec::new()).collect();
    for card in catalog.cards() {
        let Some(entry) = progress.get(&card.id) else {
            continue;
        };
        if schedule.weight(entry.box_number).is_none() {
            continue;
        }
        buckets[(entry.box_number - 1) as usize].push(card);
    }
    buckets
}

/// Choose the next card to review, or `None` if no card is eligible.
///
/// Call [`CardProgress::initialize`] first so that unseen cards take part.
pub fn select_card<'a>(
    catalog: &'a Catalog,
    progress: &CardProgress,
    schedule: &BoxSchedule,
    rng: &mut TinyRng,
) -> Option<&'a Card> {
    let buckets = bucket_cards(catalog, progress, schedule);
    let sampler = WeightedSampler::new(schedule.boxes().zip(buckets.iter()).map(
        |(box_number, bucket)| {
            if bucket.is_empty() {
                0
            } else {
                schedule.weight(box_number).unwrap_or(0)
            }
        },
    ));
    let index = sampler.sample(rng)?;
    let card = rng.choose(&buckets[index]).copied()?;
    log::debug!(
        "Drew box {} of total weight {}: card '{}'",
        index + 1,
        sampler.total(),
        card.id
    );
    Some(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::types::progress::ProgressEntry;
    use crate::types::timestamp::Timestamp;

    fn now() -> Timestamp {
        Timestamp::try_from("2025-03-01T10:00:00.000+01:00".to_string()).unwrap()
    }

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            language: "python".to_string(),
            tags: vec![],
            prompt: format!("prompt {id}"),
            solution: format!("solution {id}"),
        }
    }

    /// A catalog with one card per `(id, box)` pair, and matching progress.
    fn fixture(boxes: &[(&str, u32)]) -> Fallible<(Catalog, CardProgress)> {
        let catalog = Catalog::new(boxes.iter().map(|(id, _)| card(id)).collect())?;
        let mut progress = CardProgress::new();
        for (id, box_number) in boxes {
            let mut entry = ProgressEntry::new(now());
            entry.box_number = *box_number;
            progress.insert(*id, entry);
        }
        Ok((catalog, progress))
    }

    #[test]
    fn test_empty_catalog_is_done() {
        let catalog = Catalog::default();
        let progress = CardProgress::new();
        let mut rng = TinyRng::from_seed(0);
        assert!(select_card(&catalog, &progress, &BoxSchedule::default(), &mut rng).is_none());
    }

    #[test]
    fn test_all_mastered_is_done() -> Fallible<()> {
        let (catalog, progress) = fixture(&[("a", 6), ("b", 7), ("c", 12)])?;
        let mut rng = TinyRng::from_seed(0);
        assert!(select_card(&catalog, &progress, &BoxSchedule::default(), &mut rng).is_none());
        Ok(())
    }

    #[test]
    fn test_never_returns_out_of_range_box() -> Fallible<()> {
        let (catalog, progress) = fixture(&[("zero", 0), ("two", 2), ("six", 6), ("five", 5)])?;
        let schedule = BoxSchedule::default();
        let mut rng = TinyRng::from_seed(99);
        for _ in 0..1000 {
            let card = select_card(&catalog, &progress, &schedule, &mut rng).unwrap();
            let box_number = progress.get(&card.id).unwrap().box_number;
            assert!((1..=5).contains(&box_number));
        }
        Ok(())
    }

    #[test]
    fn test_single_card_scenario() -> Fallible<()> {
        let catalog = Catalog::new(vec![card("c1")])?;
        let mut progress = CardProgress::new();
        assert_eq!(progress.initialize(&catalog, now()), 1);
        let mut rng = TinyRng::from_seed(5);
        let chosen = select_card(&catalog, &progress, &BoxSchedule::default(), &mut rng).unwrap();
        assert_eq!(chosen, &card("c1"));
        assert_eq!(progress.get("c1").unwrap().box_number, 1);
        Ok(())
    }

    #[test]
    fn test_box_frequencies_follow_weights() -> Fallible<()> {
        // Two cards in box 1, one in box 3, three in box 5. Boxes 2 and 4
        // are empty, so the total weight is 16 + 4 + 1 = 21.
        let (catalog, progress) = fixture(&[
            ("a", 1),
            ("b", 1),
            ("c", 3),
            ("d", 5),
            ("e", 5),
            ("f", 5),
        ])?;
        let schedule = BoxSchedule::default();
        let mut rng = TinyRng::from_seed(2025);
        let trials = 210_000;
        let mut counts = [0usize; 6];
        for _ in 0..trials {
            let card = select_card(&catalog, &progress, &schedule, &mut rng).unwrap();
            counts[progress.get(&card.id).unwrap().box_number as usize] += 1;
        }
        assert_eq!(counts[2], 0);
        assert_eq!(counts[4], 0);
        for (box_number, weight) in [(1, 16.0), (3, 4.0), (5, 1.0)] {
            let expected = weight / 21.0;
            let observed = counts[box_number] as f64 / trials as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "box {box_number}: observed {observed}, expected {expected}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_uniform_within_box() -> Fallible<()> {
        let (catalog, progress) = fixture(&[("a", 2), ("b", 2)])?;
        let mut rng = TinyRng::from_seed(11);
        let trials = 20_000;
        let mut a = 0;
        for _ in 0..trials {
            if select_card(&catalog, &progress, &BoxSchedule::default(), &mut rng)
                .unwrap()
                .id
                == "a"
            {
                a += 1;
            }
        }
        let observed = a as f64 / trials as f64;
        assert!((observed - 0.5).abs() < 0.02, "observed {observed}");
        Ok(())
    }

    #[test]
    fn test_custom_schedule() -> Fallible<()> {
        let (catalog, progress) = fixture(&[("a", 3), ("b", 4)])?;
        let schedule = BoxSchedule::new(vec![2, 1, 1])?;
        let mut rng = TinyRng::from_seed(8);
        for _ in 0..100 {
            let card = select_card(&catalog, &progress, &schedule, &mut rng).unwrap();
            assert_eq!(card.id, "a");
        }
        Ok(())
    }

    #[test]
    fn test_done_serialization() -> Fallible<()> {
        let json = serde_json::to_string(&Done::default())?;
        assert_eq!(
            json,
            r#"{"id":"done","prompt":"Congratulations, you have mastered all cards!"}"#
        );
        Ok(())
    }
}
