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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::FixedOffset;

use crate::types::date::Date;
use crate::types::progress::PlayerRecord;
use crate::types::timestamp::Timestamp;

/// Summary of a player's progress.
#[derive(Debug, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    pub total_answered: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// `None` when the player has no history yet.
    pub activity: Option<Activity>,
}

/// Statistics derived from the answer history.
#[derive(Debug, PartialEq)]
pub struct Activity {
    pub answered_today: usize,
    pub longest_daily_streak: usize,
}

impl PlayerStats {
    /// Compute a player's stats. Calendar days are taken in the UTC offset of
    /// `now`.
    pub fn compute(player: &PlayerRecord, now: Timestamp) -> Self {
        let (correct, incorrect) = player
            .cards
            .iter()
            .fold((0, 0), |(c, i), (_, entry)| (c + entry.passed, i + entry.failed));
        let activity = if player.history.is_empty() {
            None
        } else {
            let offset: FixedOffset = now.offset();
            let today: Date = now.date_in(offset);
            let days: Vec<Date> = player
                .history
                .iter()
                .map(|event| event.timestamp.date_in(offset))
                .collect();
            Some(Activity {
                answered_today: days.iter().filter(|day| **day >= today).count(),
                longest_daily_streak: longest_daily_streak(days),
            })
        };
        Self {
            name: player.name.clone(),
            total_answered: correct + incorrect,
            correct,
            incorrect,
            activity,
        }
    }
}

/// The longest run of consecutive calendar days among `days`. Duplicates and
/// ordering don't matter.
pub fn longest_daily_streak(mut days: Vec<Date>) -> usize {
    days.sort();
    days.dedup();
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<Date> = None;
    for day in days {
        current = match previous {
            Some(prev) if prev.is_followed_by(day) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }
    longest
}

impl Display for PlayerStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Stats for Player: {}", self.name)?;
        writeln!(f, "Total Cards Answered: {}", self.total_answered)?;
        writeln!(f, "Correct Answers: {}", self.correct)?;
        writeln!(f, "Incorrect Answers: {}", self.incorrect)?;
        match &self.activity {
            Some(activity) => {
                writeln!(f, "Cards Answered Today: {}", activity.answered_today)?;
                write!(
                    f,
                    "Longest Daily Streak: {} day(s)",
                    activity.longest_daily_streak
                )
            }
            None => write!(f, "No review history yet, so there is no time-based data."),
        }
    }
}
