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

//! The Leitner box layout: how many boxes there are, and how often each one
//! is drawn from.

use serde::Deserialize;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;

/// Box weights when no configuration is given. Each box is reviewed half as
/// often as the one before it.
pub const DEFAULT_WEIGHTS: [u32; 5] = [16, 8, 4, 2, 1];

/// The box a card enters when first seen, and returns to after a miss.
pub const FIRST_BOX: u32 = 1;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    leitner: Option<LeitnerSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LeitnerSection {
    weights: Vec<u32>,
}

/// Maps box numbers `1..=N` to sampling weights. Cards in a box above `N`
/// are mastered and never drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSchedule {
    weights: Vec<u32>,
}

impl BoxSchedule {
    pub fn new(weights: Vec<u32>) -> Fallible<Self> {
        if weights.is_empty() {
            return fail(ErrorKind::MalformedData, "Leitner weights must name at least one box.");
        }
        if let Some(position) = weights.iter().position(|&w| w == 0) {
            return fail(
                ErrorKind::MalformedData,
                format!("Leitner weight for box {} must be positive.", position + 1),
            );
        }
        if weights.iter().try_fold(0u32, |sum, &w| sum.checked_add(w)).is_none() {
            return fail(
                ErrorKind::MalformedData,
                format!("Leitner weights must add up to at most {}.", u32::MAX),
            );
        }
        Ok(Self { weights })
    }

    /// Parse the contents of `config.toml`. A file without a `[leitner]`
    /// table yields the default schedule.
    pub fn from_toml(content: &str) -> Fallible<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        match config.leitner {
            Some(section) => Self::new(section.weights),
            None => Ok(Self::default()),
        }
    }

    /// The number of boxes, `N`.
    pub fn box_count(&self) -> u32 {
        self.weights.len() as u32
    }

    /// Box numbers in ascending order.
    pub fn boxes(&self) -> impl Iterator<Item = u32> + '_ {
        1..=self.box_count()
    }

    /// The weight of a box, or `None` if the box is outside `1..=N`.
    pub fn weight(&self, box_number: u32) -> Option<u32> {
        if box_number < FIRST_BOX {
            return None;
        }
        self.weights.get((box_number - 1) as usize).copied()
    }

    pub fn is_mastered(&self, box_number: u32) -> bool {
        box_number > self.box_count()
    }
}

impl Default for BoxSchedule {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}
