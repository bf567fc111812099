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

use crate::error::Fallible;

/// A minimal, completely insecure PRNG to pick cards.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Initialize the RNG from a seed drawn from the operating system.
    pub fn from_entropy() -> Fallible<Self> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self::from_seed(u64::from_le_bytes(bytes)))
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    // Generate random number in range [0, max).
    pub fn generate(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Pick an element uniformly at random.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.generate(items.len() as u32) as usize;
        items.get(index)
    }
}

/// Discrete weighted sampling over indices `0..n`.
///
/// Index `i` is drawn with probability `weights[i] / total`. Indices with
/// zero weight are never drawn.
pub struct WeightedSampler {
    /// `cumulative[i]` is the sum of `weights[0..=i]`.
    cumulative: Vec<u32>,
}

impl WeightedSampler {
    pub fn new(weights: impl IntoIterator<Item = u32>) -> Self {
        let mut total: u32 = 0;
        let cumulative = weights
            .into_iter()
            .map(|w| {
                total = total.saturating_add(w);
                total
            })
            .collect();
        Self { cumulative }
    }

    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Draw an index, or `None` if the total weight is zero.
    pub fn sample(&self, rng: &mut TinyRng) -> Option<usize> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let draw = rng.generate(total);
        Some(self.locate(draw))
    }

    /// The index whose range `[cumulative[i-1], cumulative[i])` holds `draw`.
    fn locate(&self, draw: u32) -> usize {
        self.cumulative.partition_point(|&c| c <= draw)
    }
}
